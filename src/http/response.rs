//! HTTP response building module
//!
//! Provides builders for the response shapes this service emits, decoupled
//! from field extraction and rendering.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(404)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("Resource not found")))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("Resource not found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(204)
        .header("Allow", "GET, HEAD, OPTIONS")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("OPTIONS", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 500 Internal Server Error response
///
/// The body is deliberately generic; internal detail goes to the error log
/// only.
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from("Server error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("Server error")))
        })
}

/// Build a plain-text response carrying a status and message verbatim,
/// used for request errors surfaced by the boundary layer.
pub fn build_error_response(status: u16, message: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from(message.to_string())))
        .unwrap_or_else(|e| {
            log_build_error("error", &e);
            build_500_response()
        })
}

/// Build 200 HTML response
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 JSON response
pub fn build_json_response(data: Vec<u8>, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = data.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 200 plain-text response
pub fn build_plain_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("plain", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_404_body() {
        let response = build_404_response();
        assert_eq!(response.status(), 404);
        assert_eq!(body_text(response).await, "Resource not found");
    }

    #[tokio::test]
    async fn test_500_body_is_generic() {
        let response = build_500_response();
        assert_eq!(response.status(), 500);
        assert_eq!(body_text(response).await, "Server error");
    }

    #[tokio::test]
    async fn test_error_response_carries_status_and_message() {
        let response = build_error_response(413, "Payload Too Large");
        assert_eq!(response.status(), 413);
        assert_eq!(body_text(response).await, "Payload Too Large");
    }

    #[test]
    fn test_405_sets_allow_header() {
        let response = build_405_response();
        assert_eq!(response.status(), 405);
        assert_eq!(response.headers()["Allow"], "GET, HEAD, OPTIONS");
    }

    #[tokio::test]
    async fn test_head_elides_body_but_keeps_length() {
        let response = build_html_response("<html></html>".to_string(), true);
        assert_eq!(response.headers()["Content-Length"], "13");
        assert!(body_text(response).await.is_empty());
    }

    #[test]
    fn test_content_types() {
        assert_eq!(
            build_json_response(b"{}".to_vec(), false).headers()["Content-Type"],
            "application/json"
        );
        assert_eq!(
            build_plain_response("x".to_string(), false).headers()["Content-Type"],
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            build_html_response(String::new(), false).headers()["Content-Type"],
            "text/html; charset=utf-8"
        );
    }
}
