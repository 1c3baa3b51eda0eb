//! # AccessGrid Client
//!
//! Authenticated async client for the AccessGrid API.
//!
//! ## Request pipeline
//!
//! Every request is signed with HMAC-SHA256 over a canonical payload:
//!
//! - Requests with a JSON body sign the body exactly as sent
//! - Bodiless requests sign `{"id": "<resource>"}` derived from the path and
//!   repeat it in the `sig_payload` query parameter
//!
//! The signature travels in `X-PAYLOAD-SIG` next to the account id in
//! `X-ACCT-ID`. Responses are classified into [`AccessGridError`] variants by
//! status code.
//!
//! ## Usage
//!
//! ```no_run
//! use accessgrid_client::{AccessGridClient, ClientConfig};
//! use accessgrid_client::models::ListKeysRequest;
//!
//! # async fn run() -> accessgrid_client::Result<()> {
//! let client = AccessGridClient::new(ClientConfig::new("acct-id", "secret-key"))?;
//! let cards = client
//!     .access_cards()
//!     .list(&ListKeysRequest::for_template("0xd3adb00b5"))
//!     .await?;
//! for card in cards {
//!     println!("{card}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cards;
pub mod client;
pub mod config;
pub mod console;
pub mod encoding;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use accessgrid_core as core;
pub use accessgrid_models as models;

pub use cards::AccessCards;
pub use client::{AccessGridClient, USER_AGENT};
pub use config::{ClientConfig, Credentials, DEFAULT_BASE_URL};
pub use console::Console;
pub use error::{AccessGridError, ErrorKind, Result};
pub use request::RequestDescriptor;
pub use transport::{
    HttpTransport, HttpTransportConfig, OutboundRequest, Transport, TransportError,
    TransportResponse,
};
