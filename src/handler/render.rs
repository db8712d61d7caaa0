//! Observation rendering module
//!
//! Serializes a `ClientObservation` into one of the three supported
//! representations. Rendering is a pure function of the observation; the
//! same input always produces a byte-identical body.

use crate::clientinfo::ClientObservation;
use crate::handler::error::HandlerError;
use crate::http;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Render the observation as a JSON object with exactly the keys
/// `ip_address`, `locale`, and `preferred_language`.
pub fn json_response(
    observation: &ClientObservation,
    is_head: bool,
) -> Result<Response<Full<Bytes>>, HandlerError> {
    let body = serde_json::to_vec(observation)?;
    Ok(http::build_json_response(body, is_head))
}

/// Render the observation as plain text: the bare IP address, nothing else.
pub fn plain_response(observation: &ClientObservation, is_head: bool) -> Response<Full<Bytes>> {
    http::build_plain_response(observation.ip_address.clone(), is_head)
}

/// Render the observation as an HTML page.
pub fn html_response(observation: &ClientObservation, is_head: bool) -> Response<Full<Bytes>> {
    http::build_html_response(html_page(observation), is_head)
}

/// Build the HTML page: the IP as a heading, locale and preferred language
/// in a block, and links to the alternative representations.
fn html_page(observation: &ClientObservation) -> String {
    let ip = escape_html(&observation.ip_address);
    let locale = escape_html(&observation.locale);
    let preferred = escape_html(&observation.preferred_language);

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>IP address</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Arial, sans-serif;
            max-width: 600px;
            margin: 60px auto;
            padding: 0 20px;
            line-height: 1.6;
        }}
        h1 {{
            font-size: 2.5em;
            margin-bottom: 20px;
        }}
        pre {{
            background: #f4f4f4;
            padding: 15px;
            border-radius: 8px;
        }}
    </style>
</head>
<body>
    <h1>{ip}</h1>
    <pre>locale: {locale}
preferred language: {preferred}</pre>
    <p>Other formats:</p>
    <ul>
        <li><a href="/json">JSON</a></li>
        <li><a href="/plain">plain text</a></li>
    </ul>
</body>
</html>
"#
    )
}

/// Escape text for embedding in HTML body or attribute context.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn observation() -> ClientObservation {
        ClientObservation {
            ip_address: "203.0.113.7".to_string(),
            locale: "en_US".to_string(),
            preferred_language: "en".to_string(),
        }
    }

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("en_US"), "en_US");
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a&b\"c"), "a&amp;b&quot;c");
    }

    #[tokio::test]
    async fn test_json_body_is_flat_three_key_object() {
        let response = json_response(&observation(), false).unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            body_text(response).await,
            r#"{"ip_address":"203.0.113.7","locale":"en_US","preferred_language":"en"}"#
        );
    }

    #[tokio::test]
    async fn test_plain_body_is_bare_ip() {
        let response = plain_response(&observation(), false);
        assert_eq!(body_text(response).await, "203.0.113.7");
    }

    #[tokio::test]
    async fn test_html_contains_fields_and_links() {
        let response = html_response(&observation(), false);
        let body = body_text(response).await;
        assert!(body.contains("<h1>203.0.113.7</h1>"));
        assert!(body.contains("locale: en_US"));
        assert!(body.contains("preferred language: en"));
        assert!(body.contains(r#"<a href="/json">"#));
        assert!(body.contains(r#"<a href="/plain">"#));
    }

    #[tokio::test]
    async fn test_html_escapes_hostile_language_tag() {
        let hostile = ClientObservation {
            ip_address: "203.0.113.7".to_string(),
            locale: "<script>alert(1)</script>".to_string(),
            preferred_language: "en".to_string(),
        };
        let body = body_text(html_response(&hostile, false)).await;
        assert!(!body.contains("<script>alert(1)</script>"));
        assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[tokio::test]
    async fn test_json_keeps_html_characters_raw() {
        let hostile = ClientObservation {
            ip_address: "203.0.113.7".to_string(),
            locale: "<script>".to_string(),
            preferred_language: "en".to_string(),
        };
        let body = body_text(json_response(&hostile, false).unwrap()).await;
        assert!(body.contains(r#""locale":"<script>""#));
    }

    #[tokio::test]
    async fn test_rendering_is_deterministic() {
        let first = body_text(html_response(&observation(), false)).await;
        let second = body_text(html_response(&observation(), false)).await;
        assert_eq!(first, second);
    }
}
