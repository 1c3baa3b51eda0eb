//! Response classification.
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 2xx | body, parsed into the expected type when one is requested |
//! | 401 | [`AccessGridError::Authentication`] with the raw body |
//! | 402 | [`AccessGridError::InsufficientBalance`], body ignored |
//! | other | [`AccessGridError::ApiRequest`] with the body's `message` or the raw body |

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AccessGridError, Result};

/// Classify a response, returning the raw body on success.
///
/// # Errors
///
/// Returns the failure matching a non-2xx status.
pub fn classify_raw(status: u16, body: String) -> Result<String> {
    match status {
        200..=299 => Ok(body),
        401 => Err(AccessGridError::Authentication { message: body }),
        402 => Err(AccessGridError::InsufficientBalance),
        _ => Err(AccessGridError::ApiRequest {
            status,
            message: error_message(&body),
        }),
    }
}

/// Classify a response and parse a successful body as `T`.
///
/// # Errors
///
/// Returns the failure matching a non-2xx status, or
/// [`AccessGridError::Deserialization`] if a 2xx body is not a valid `T`.
pub fn classify<T: DeserializeOwned>(status: u16, body: String) -> Result<T> {
    let body = classify_raw(status, body)?;
    parse_body(&body)
}

/// Parse a successful response body.
///
/// # Errors
///
/// Returns [`AccessGridError::Deserialization`] wrapping the parse error.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(AccessGridError::Deserialization)
}

/// Best-effort error message: the `message` field of a JSON object body,
/// else the body itself.
fn error_message(body: &str) -> String {
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    match fields.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => body.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: String,
        name: String,
    }

    #[test]
    fn success_returns_raw_body() {
        assert_eq!(classify_raw(200, "anything".into()).unwrap(), "anything");
        assert_eq!(classify_raw(204, String::new()).unwrap(), "");
    }

    #[test]
    fn success_parses_typed_body() {
        let named: Named = classify(200, r#"{"id": "test-id", "name": "Test"}"#.into()).unwrap();
        assert_eq!(
            named,
            Named {
                id: "test-id".into(),
                name: "Test".into()
            }
        );
    }

    #[test]
    fn unauthorized_includes_body() {
        let err = classify_raw(401, "bad creds".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert!(err.to_string().contains("bad creds"));
    }

    #[test]
    fn payment_required_ignores_body() {
        for body in ["", "whatever", r#"{"message": "pay up"}"#] {
            let err = classify_raw(402, body.into()).unwrap_err();
            assert!(matches!(err, AccessGridError::InsufficientBalance));
            assert_eq!(err.to_string(), "insufficient account balance");
        }
    }

    #[test]
    fn server_error_extracts_message() {
        let err = classify_raw(500, r#"{"message":"oops"}"#.into()).unwrap_err();
        let AccessGridError::ApiRequest { status, message } = err else {
            panic!("expected ApiRequest");
        };
        assert_eq!(status, 500);
        assert_eq!(message, "oops");
    }

    #[test]
    fn error_without_message_uses_raw_body() {
        let body = r#"{"error":"not_found"}"#;
        let err = classify_raw(404, body.into()).unwrap_err();
        assert!(matches!(
            err,
            AccessGridError::ApiRequest { status: 404, ref message } if message == body
        ));
    }

    #[test]
    fn unparseable_error_uses_raw_body() {
        let err = classify_raw(503, "<html>down</html>".into()).unwrap_err();
        assert!(matches!(
            err,
            AccessGridError::ApiRequest { ref message, .. } if message == "<html>down</html>"
        ));
    }

    #[test]
    fn non_string_message_is_rendered() {
        let err = classify_raw(422, r#"{"message":["a","b"]}"#.into()).unwrap_err();
        assert!(matches!(
            err,
            AccessGridError::ApiRequest { ref message, .. } if message == r#"["a","b"]"#
        ));
    }

    #[test]
    fn null_message_uses_raw_body() {
        let body = r#"{"message":null}"#;
        let err = classify_raw(400, body.into()).unwrap_err();
        assert!(matches!(
            err,
            AccessGridError::ApiRequest { ref message, .. } if message == body
        ));
    }

    #[test]
    fn success_with_bad_body_is_deserialization_failure() {
        let err = classify::<Named>(200, "not json".into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Deserialization);

        let err = classify::<Named>(200, r#"{"id": 1}"#.into()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Deserialization);
    }

    #[test]
    fn redirect_status_is_a_failure() {
        let err = classify_raw(302, String::new()).unwrap_err();
        assert_eq!(err.status(), Some(302));
    }
}
