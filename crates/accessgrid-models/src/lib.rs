//! # AccessGrid Models
//!
//! Wire data model for the AccessGrid API.
//!
//! ## Conventions
//!
//! - Field names are the API's `snake_case` keys
//! - Unset optional fields are omitted from serialized JSON, never sent as `null`
//! - Enumerations serialize to fixed tokens declared per variant
//!
//! ## Paths
//!
//! Endpoint scheme: `/v1/key-cards/...` and `/v1/console/card-templates/...`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cards;
pub mod enums;
pub mod events;
pub mod paths;
pub mod templates;

pub use cards::{
    AccessCard, Device, IssuedCard, KeysListResponse, ListKeysRequest, ProvisionCardRequest,
    UnifiedAccessPass, UpdateCardRequest,
};
pub use enums::{
    AccessPassState, DeviceKind, DeviceStatus, DeviceType, Platform, Protocol,
    TemplateEventType, UnknownToken,
};
pub use paths::CardAction;
pub use templates::{
    CreateTemplateRequest, EventLogEntry, EventLogFilters, EventLogResponse, SupportInfo,
    Template, TemplateDesign, UpdateTemplateRequest,
};
