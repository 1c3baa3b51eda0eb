//! # AccessGrid Core
//!
//! Request authentication primitives for the AccessGrid API.
//!
//! This crate provides:
//! - The HMAC-SHA256 payload signature sent as `X-PAYLOAD-SIG`
//! - Canonical signing payload construction, including the `sig_payload`
//!   query mirror used by bodiless requests
//!
//! Both are pure functions. Other client implementations of the protocol must
//! produce identical bytes for the same request, so changes here are
//! wire-breaking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod payload;
pub mod signature;

pub use payload::{
    build_payload, path_target, resource_identity, CanonicalPayload, HttpMethod, PathTarget,
    PayloadError, SIG_PAYLOAD_PARAM,
};
pub use signature::{sign, SecretKey, Signature, SIGNATURE_LEN};
