// File: src/request_context.rs
// Purpose: Submitted form fields and the render locale of a request

use axum::http::{header, HeaderMap};
use form_binding::Locale;

/// Form data from POST requests.
///
/// Keeps every pair in submission order and leaves values untouched, so
/// the binder sees exactly what the user typed.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    /// Create empty form data
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` body
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        let fields = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), decode_component(value))
            })
            .collect();
        Self { fields }
    }

    /// Parse the body when the request declares a urlencoded form; anything
    /// else yields empty form data
    pub fn from_request(headers: &HeaderMap, body: &[u8]) -> Self {
        let is_form = headers
            .get(header::CONTENT_TYPE)
            .and_then(|ct| ct.to_str().ok())
            .map_or(false, |ct| ct.starts_with("application/x-www-form-urlencoded"));
        if is_form {
            Self::from_urlencoded(body)
        } else {
            Self::new()
        }
    }

    /// All pairs in submission order
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    let decoded = urlencoding::decode_binary(spaced.as_bytes());
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Pick the render locale from `Accept-Language`: the primary language of
/// the first listed tag, or `default` when the header is missing or a
/// wildcard
pub fn negotiate_locale(headers: &HeaderMap, default: &Locale) -> Locale {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|first| first.split(';').next().unwrap_or_default().trim())
        .filter(|tag| !tag.is_empty() && *tag != "*")
        .map(|tag| Locale::new(Locale::new(tag).language()))
        .unwrap_or_else(|| default.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn values<'a>(form: &'a FormData, key: &str) -> Vec<&'a str> {
        form.pairs().filter(|(k, _)| *k == key).map(|(_, v)| v).collect()
    }

    #[test]
    fn test_form_data_decoding() {
        let form = FormData::from_urlencoded(b"itemName=blue+pen%21&price=1000&quantity=");

        assert_eq!(values(&form, "itemName"), vec!["blue pen!"]);
        assert_eq!(values(&form, "price"), vec!["1000"]);
        assert_eq!(values(&form, "quantity"), vec![""]);
        assert!(values(&form, "id").is_empty());
    }

    #[test]
    fn test_form_data_preserves_whitespace_and_order() {
        let form = FormData::from_urlencoded(b"itemName=%20%20&price=1&price=2&flag");

        assert_eq!(values(&form, "itemName"), vec!["  "]);
        assert_eq!(values(&form, "price"), vec!["1", "2"]);
        assert_eq!(values(&form, "flag"), vec![""]);
        let keys: Vec<&str> = form.pairs().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["itemName", "price", "price", "flag"]);
    }

    #[test]
    fn test_form_data_requires_form_content_type() {
        let mut headers = HeaderMap::new();
        assert!(FormData::from_request(&headers, b"price=1").pairs().next().is_none());

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=UTF-8"),
        );
        let form = FormData::from_request(&headers, b"price=1");
        assert_eq!(values(&form, "price"), vec!["1"]);
    }

    #[rstest]
    #[case(None, "en")]
    #[case(Some("ko-KR,ko;q=0.9,en;q=0.8"), "ko")]
    #[case(Some("en-US"), "en")]
    #[case(Some("fr;q=0.7"), "fr")]
    #[case(Some("*"), "en")]
    #[case(Some(""), "en")]
    fn test_negotiate_locale(#[case] header_value: Option<&str>, #[case] expected: &str) {
        let mut headers = HeaderMap::new();
        if let Some(value) = header_value {
            headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_str(value).unwrap());
        }
        assert_eq!(negotiate_locale(&headers, &Locale::new("en")).tag(), expected);
    }
}
