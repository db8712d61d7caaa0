//! Accept-Language negotiation module
//!
//! Derives the locale and preferred language from the Accept-Language header.
//! The client's token order is taken as its priority order; q-values are
//! stripped rather than sorted.

/// Derive `(locale, preferred_language)` from an Accept-Language header value.
///
/// The first non-empty language token wins. Its lowercased primary subtag
/// becomes the preferred language (`en`), and the full normalized tag with
/// underscores and uppercased subtags becomes the locale (`en_US`). A token
/// without a region yields the primary subtag for both. An absent or
/// unparseable header yields the configured default locale for both.
pub fn negotiate_language(header: Option<&str>, default_locale: &str) -> (String, String) {
    let Some(header) = header.map(str::trim).filter(|h| !h.is_empty()) else {
        return (default_locale.to_string(), default_locale.to_string());
    };

    for part in header.split(',') {
        let token = part.trim();
        if token.is_empty() {
            continue;
        }

        // Drop the quality weight, e.g. "en;q=0.9" -> "en"
        let token = token.split(';').next().unwrap_or("");

        if let Some((primary, formatted)) = normalize_lang_token(token) {
            return (formatted, primary);
        }
    }

    (default_locale.to_string(), default_locale.to_string())
}

/// Normalize a single language tag into `(primary, formatted)`.
///
/// "en-US" -> ("en", "en_US"), "fr" -> ("fr", "fr"). Subtags after the
/// primary are uppercased, so "zh-Hans-CN" -> "zh_HANS_CN".
fn normalize_lang_token(token: &str) -> Option<(String, String)> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let mut segments = token.split('-');

    let primary = segments.next()?.trim().to_lowercase();
    if primary.is_empty() {
        return None;
    }

    let mut formatted = primary.clone();
    for segment in segments {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        formatted.push('_');
        formatted.push_str(&segment.to_uppercase());
    }

    Some((primary, formatted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_tag() {
        let (locale, preferred) = negotiate_language(Some("en-US,en;q=0.9"), "en");
        assert_eq!(locale, "en_US");
        assert_eq!(preferred, "en");
    }

    #[test]
    fn test_primary_only() {
        let (locale, preferred) = negotiate_language(Some("fr"), "en");
        assert_eq!(locale, "fr");
        assert_eq!(preferred, "fr");
    }

    #[test]
    fn test_case_normalization() {
        let (locale, preferred) = negotiate_language(Some("EN-gb"), "en");
        assert_eq!(locale, "en_GB");
        assert_eq!(preferred, "en");
    }

    #[test]
    fn test_multi_subtag() {
        let (locale, preferred) = negotiate_language(Some("zh-Hans-CN,zh;q=0.8"), "en");
        assert_eq!(locale, "zh_HANS_CN");
        assert_eq!(preferred, "zh");
    }

    #[test]
    fn test_missing_header_uses_default() {
        assert_eq!(
            negotiate_language(None, "en"),
            ("en".to_string(), "en".to_string())
        );
        assert_eq!(
            negotiate_language(Some("   "), "de"),
            ("de".to_string(), "de".to_string())
        );
    }

    #[test]
    fn test_skips_empty_tokens() {
        let (locale, preferred) = negotiate_language(Some(" , ,de-AT;q=0.7"), "en");
        assert_eq!(locale, "de_AT");
        assert_eq!(preferred, "de");
    }

    #[test]
    fn test_garbage_quality_only() {
        // A bare weight without a tag has no primary subtag to extract
        assert_eq!(
            negotiate_language(Some(";q=0.9"), "en"),
            ("en".to_string(), "en".to_string())
        );
    }
}
