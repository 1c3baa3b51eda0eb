//! Query string encoding.
//!
//! Keys and values are percent-encoded with everything outside the RFC 3986
//! unreserved set escaped. The server decodes `sig_payload` and compares it to
//! the payload it recomputes, so the escaping must be lossless.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in query keys and values: all but `A-Z a-z 0-9 - _ . ~`.
const QUERY_COMPONENT_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encode one query key or value.
///
/// # Examples
///
/// ```
/// use accessgrid_client::encoding::encode_query_component;
///
/// assert_eq!(
///     encode_query_component(r#"{"id": "abc123"}"#),
///     "%7B%22id%22%3A%20%22abc123%22%7D"
/// );
/// ```
#[must_use]
pub fn encode_query_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT_ESCAPE).to_string()
}

/// Decode a percent-encoded query key or value.
///
/// # Errors
///
/// Returns error if the decoded bytes are not valid UTF-8.
pub fn decode_query_component(encoded: &str) -> Result<String, EncodingError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.into_owned())
        .map_err(|e| EncodingError::Utf8Decode(e.to_string()))
}

/// Join parameters into `k1=v1&k2=v2`, preserving order.
#[must_use]
pub fn build_query_string(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                encode_query_component(key),
                encode_query_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Set a parameter, dropping earlier values for the key and appending it last.
pub fn set_query_param(params: &mut Vec<(String, String)>, key: &str, value: &str) {
    params.retain(|(existing, _)| existing != key);
    params.push((key.to_string(), value.to_string()));
}

/// Append an encoded query string to a URL.
#[must_use]
pub fn append_query(url: &str, params: &[(String, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{}", build_query_string(params))
}

/// Errors that can occur while decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// UTF-8 decoding failed
    #[error("UTF-8 decode error: {0}")]
    Utf8Decode(String),
}
