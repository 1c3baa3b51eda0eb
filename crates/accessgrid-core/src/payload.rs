//! Canonical signing payloads.
//!
//! The server recomputes the signature from what it can see, so the client
//! has to produce exactly the same string:
//!
//! - Requests carrying a JSON body sign the serialized body verbatim.
//! - Requests without a body (`GET`, and bodiless "action" calls such as
//!   `POST /v1/key-cards/{id}/suspend`) sign a synthetic `{"id": "<identity>"}`
//!   object derived from the path, and repeat that string in the
//!   `sig_payload` query parameter.
//! - Anything else signs `{}`.
//!
//! The synthetic object is written with a space after the colon. This is the
//! form the server reconstructs; a compact `{"id":"..."}` will not verify.

use std::fmt;
use std::str::FromStr;

/// Query parameter carrying a visible copy of the signed payload.
pub const SIG_PAYLOAD_PARAM: &str = "sig_payload";

/// Trailing path segments that name an action on the preceding resource.
pub const ACTION_KEYWORDS: [&str; 4] = ["suspend", "resume", "unlink", "delete"];

/// Path segment of the key-card collection.
pub const KEY_CARDS_SEGMENT: &str = "key-cards";

const EMPTY_PAYLOAD: &str = "{}";

/// HTTP methods used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
}

impl HttpMethod {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
        }
    }

    /// Whether requests with this method may carry a body.
    #[must_use]
    pub const fn allows_body(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = PayloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            _ => Err(PayloadError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// What a bodiless request's path points at, for signing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathTarget<'a> {
    /// The bare key-card collection (`/v1/key-cards`).
    Collection,
    /// A single resource, identified by this path segment.
    Resource(&'a str),
    /// Nothing the server signs an identity for.
    Unidentified,
}

/// Extract the resource identity from a request path.
///
/// The identity is the last path segment, or the one before it when the last
/// segment is an action keyword. Paths with fewer than two segments have no
/// identity. Any query string on `path` is ignored.
#[must_use]
pub fn resource_identity(path: &str) -> Option<&str> {
    let segments = path_segments(path);
    let identity = match segments.as_slice() {
        [.., parent, last] if ACTION_KEYWORDS.contains(last) => *parent,
        [_, .., last] => *last,
        _ => return None,
    };

    (!identity.is_empty()).then_some(identity)
}

/// Decide what a bodiless request to `path` signs.
#[must_use]
pub fn path_target(path: &str) -> PathTarget<'_> {
    // The collection is a trailing `key-cards` not itself under `key-cards`.
    if let [.., parent, last] = path_segments(path).as_slice() {
        if *last == KEY_CARDS_SEGMENT && *parent != KEY_CARDS_SEGMENT {
            return PathTarget::Collection;
        }
    }

    match resource_identity(path) {
        Some(id) if id != KEY_CARDS_SEGMENT && !id.contains("templates") => {
            PathTarget::Resource(id)
        }
        _ => PathTarget::Unidentified,
    }
}

fn path_segments(path: &str) -> Vec<&str> {
    let path = path.split('?').next().unwrap_or_default();
    path.trim_matches('/').split('/').collect()
}

/// The string to sign for one request, and whether it is mirrored into the
/// query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalPayload {
    payload: String,
    mirrored: bool,
}

impl CanonicalPayload {
    fn body(payload: String) -> Self {
        Self {
            payload,
            mirrored: false,
        }
    }

    fn identity(id: &str) -> Self {
        // Value's Display gives the JSON string literal, escapes included.
        let literal = serde_json::Value::String(id.to_owned());
        Self {
            payload: format!("{{\"id\": {literal}}}"),
            mirrored: true,
        }
    }

    /// The exact string to sign.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.payload
    }

    /// The value for the `sig_payload` query parameter, if one must be sent.
    #[must_use]
    pub fn sig_payload(&self) -> Option<&str> {
        self.mirrored.then_some(self.payload.as_str())
    }

    /// The extra `(key, value)` query parameter, if one must be sent.
    #[must_use]
    pub fn extra_query_param(&self) -> Option<(&'static str, &str)> {
        self.sig_payload().map(|value| (SIG_PAYLOAD_PARAM, value))
    }
}

/// Build the canonical payload for a request.
///
/// `body` is the already-serialized JSON body. It is signed verbatim when the
/// method allows a body; otherwise the payload is derived from `path`.
///
/// # Examples
///
/// ```
/// use accessgrid_core::{build_payload, HttpMethod};
///
/// let payload = build_payload(HttpMethod::Post, "/v1/key-cards/abc123/suspend", None);
/// assert_eq!(payload.as_str(), r#"{"id": "abc123"}"#);
/// assert_eq!(payload.sig_payload(), Some(r#"{"id": "abc123"}"#));
/// ```
#[must_use]
pub fn build_payload(method: HttpMethod, path: &str, body: Option<&str>) -> CanonicalPayload {
    if let (true, Some(body)) = (method.allows_body(), body) {
        return CanonicalPayload::body(body.to_string());
    }

    match path_target(path) {
        PathTarget::Collection => CanonicalPayload::identity(KEY_CARDS_SEGMENT),
        PathTarget::Resource(id) => CanonicalPayload::identity(id),
        PathTarget::Unidentified => CanonicalPayload::body(EMPTY_PAYLOAD.to_string()),
    }
}

/// Errors raised while preparing a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    /// The method is not one the API uses
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}
