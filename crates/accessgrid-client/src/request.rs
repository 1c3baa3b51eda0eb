//! Request descriptors built by the resource facades.

use std::time::Duration;

use accessgrid_core::HttpMethod;
use serde::Serialize;

use crate::error::{AccessGridError, Result};

/// One API call, before signing.
///
/// The body is serialized when it is attached, so the string that is signed
/// is the string that is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the base URL, e.g. `/v1/key-cards`
    pub path: String,
    /// Serialized JSON body
    pub body: Option<String>,
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl RequestDescriptor {
    /// A request without body or query.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            timeout: None,
        }
    }

    /// `GET path`
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// `POST path`
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// `PUT path`
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// `PATCH path`
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    /// Attach a JSON body. A value that serializes to `null` leaves the
    /// request bodiless.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGridError::Serialization`] if the body cannot be
    /// encoded.
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let json =
            serde_json::to_string(body).map_err(|e| AccessGridError::Serialization(e.to_string()))?;
        self.body = (json != "null").then_some(json);
        Ok(self)
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query parameter when a value is present and non-empty.
    #[must_use]
    pub fn with_optional_query<V: Into<String>>(self, key: &str, value: Option<V>) -> Self {
        match value.map(Into::into) {
            Some(value) if !value.is_empty() => self.with_query(key, value),
            _ => self,
        }
    }

    /// Bound this request's duration.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_method() {
        assert_eq!(RequestDescriptor::get("/a").method, HttpMethod::Get);
        assert_eq!(RequestDescriptor::post("/a").method, HttpMethod::Post);
        assert_eq!(RequestDescriptor::put("/a").method, HttpMethod::Put);
        assert_eq!(RequestDescriptor::patch("/a").method, HttpMethod::Patch);
    }

    #[test]
    fn json_body_is_serialized_once() {
        let request = RequestDescriptor::post("/v1/key-cards")
            .with_json(&serde_json::json!({"full_name": "Jane"}))
            .unwrap();
        assert_eq!(request.body.as_deref(), Some(r#"{"full_name":"Jane"}"#));
    }

    #[test]
    fn null_body_is_no_body() {
        let request = RequestDescriptor::post("/v1/key-cards/abc123/suspend")
            .with_json(&None::<String>)
            .unwrap();
        assert!(request.body.is_none());

        let request = RequestDescriptor::patch("/v1/key-cards/abc123")
            .with_json(&serde_json::Value::Null)
            .unwrap();
        assert!(request.body.is_none());
    }

    #[test]
    fn optional_query_skips_missing_and_empty() {
        let request = RequestDescriptor::get("/v1/key-cards")
            .with_optional_query("template_id", Some("t1"))
            .with_optional_query::<String>("state", None)
            .with_optional_query("device", Some(""));
        assert_eq!(
            request.query,
            vec![("template_id".to_string(), "t1".to_string())]
        );
    }

    #[test]
    fn timeout_is_recorded() {
        let request = RequestDescriptor::get("/a").with_timeout(Duration::from_secs(3));
        assert_eq!(request.timeout, Some(Duration::from_secs(3)));
    }
}
