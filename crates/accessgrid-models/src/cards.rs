//! Access card (NFC key) resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::enums::{AccessPassState, DeviceStatus, DeviceType, Platform};

/// Deserialize a field, reading `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A wallet device a card has been installed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Wallet platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    /// Device family
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_type: Option<DeviceType>,
    /// Provisioning status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DeviceStatus>,
    /// When the device was first seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last status change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// An issued NFC key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessCard {
    /// Card identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URL the holder opens to install the pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_url: Option<String>,
    /// Lifecycle state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AccessPassState>,
    /// Template the card was issued from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_template_id: Option<String>,
    /// Employee identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Physical tag identifier (key diversification only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    /// H10301 site code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
    /// H10301 card number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Credential pool the site code and card number were drawn from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_pool_id: Option<String>,
    /// Proprietary payload, up to 8192 bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    /// Holder's full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Holder's email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Holder's phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Employment classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// Holder's title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When the card becomes valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// When the card expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Base64 encoded photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
    /// Hotel use case: loyalty/membership id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    /// Hotel use case: membership status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<String>,
    /// Hotel use case: pass ready for transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pass_ready_to_transact: Option<bool>,
    /// Hotel use case: tile display data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_data: Option<Value>,
    /// Hotel use case: reservation data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations: Option<Value>,
    /// Whether the card may live on several devices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_on_multiple_devices: Option<bool>,
    /// Platform-specific direct install link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct_install_url: Option<String>,
    /// Devices holding this card; `null` reads as empty
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub devices: Vec<Device>,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl std::fmt::Display for AccessCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AccessCard(name='{}', id='{}', state='{}')",
            self.full_name.as_deref().unwrap_or_default(),
            self.id.as_deref().unwrap_or_default(),
            self.state.map(AccessPassState::as_str).unwrap_or_default(),
        )
    }
}

/// A pass issued from a template pair, bundling one card per platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedAccessPass {
    /// Pass identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// URL the holder opens to install the pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_url: Option<String>,
    /// Lifecycle state
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AccessPassState>,
    /// Template pair the pass was issued from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_template_id: Option<String>,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Per-platform cards
    pub details: Vec<AccessCard>,
}

/// Result of issuing a card.
///
/// The issue endpoint answers with either a single card or, for template
/// pairs, a unified pass carrying a non-empty `details` list.
#[derive(Debug, Clone, PartialEq)]
pub enum IssuedCard {
    /// A single card
    Card(AccessCard),
    /// A unified pass with one card per platform
    Unified(UnifiedAccessPass),
}

impl IssuedCard {
    /// Resolve the result shape from a raw response body.
    ///
    /// # Errors
    ///
    /// Returns error if the body is not valid JSON for the detected shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(raw)?;
        let unified = value
            .get("details")
            .and_then(Value::as_array)
            .is_some_and(|details| !details.is_empty());

        if unified {
            serde_json::from_value(value).map(Self::Unified)
        } else {
            serde_json::from_value(value).map(Self::Card)
        }
    }

    /// Identifier of the card or pass.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Card(card) => card.id.as_deref(),
            Self::Unified(pass) => pass.id.as_deref(),
        }
    }

    /// Install URL of the card or pass.
    #[must_use]
    pub fn install_url(&self) -> Option<&str> {
        match self {
            Self::Card(card) => card.install_url.as_deref(),
            Self::Unified(pass) => pass.install_url.as_deref(),
        }
    }
}

/// Body of `POST /v1/key-cards`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvisionCardRequest {
    /// Template to issue from
    pub card_template_id: String,
    /// Employee identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Physical tag identifier (key diversification only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_id: Option<String>,
    /// H10301 site code, under 255
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
    /// H10301 card number, under 65535
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Pool to draw site code and card number from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_pool_id: Option<String>,
    /// Proprietary payload, up to 8192 bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    /// Holder's full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Holder's email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Holder's phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Employment classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// Holder's title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When the card becomes valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// When the card expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Base64 encoded photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
    /// Hotel use case: loyalty/membership id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    /// Hotel use case: membership status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<String>,
    /// Hotel use case: pass ready for transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pass_ready_to_transact: Option<bool>,
    /// Hotel use case: tile display data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_data: Option<Value>,
    /// Hotel use case: reservation data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations: Option<Value>,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl ProvisionCardRequest {
    /// Start a request for the given template.
    #[must_use]
    pub fn new(card_template_id: impl Into<String>) -> Self {
        Self {
            card_template_id: card_template_id.into(),
            ..Default::default()
        }
    }
}

/// Body of `PATCH /v1/key-cards/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCardRequest {
    /// Employee identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Holder's full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Holder's email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Holder's phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Employment classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<String>,
    /// Holder's title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When the card becomes valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// When the card expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Base64 encoded photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_photo: Option<String>,
    /// Proprietary payload, up to 8192 bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_data: Option<String>,
    /// Hotel use case: membership status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_status: Option<String>,
    /// Hotel use case: pass ready for transactions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_pass_ready_to_transact: Option<bool>,
    /// Hotel use case: tile display data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_data: Option<Value>,
    /// Hotel use case: reservation data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservations: Option<Value>,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Filters for `GET /v1/key-cards`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListKeysRequest {
    /// Template to list keys for
    pub template_id: Option<String>,
    /// Only keys in this state
    pub state: Option<AccessPassState>,
}

impl ListKeysRequest {
    /// List keys issued from a template.
    #[must_use]
    pub fn for_template(template_id: impl Into<String>) -> Self {
        Self {
            template_id: Some(template_id.into()),
            state: None,
        }
    }

    /// Restrict to one state.
    #[must_use]
    pub fn with_state(mut self, state: AccessPassState) -> Self {
        self.state = Some(state);
        self
    }
}

/// Response of `GET /v1/key-cards`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeysListResponse {
    /// Matching keys; `null` or absent when there are none
    #[serde(default)]
    pub keys: Option<Vec<AccessCard>>,
}
