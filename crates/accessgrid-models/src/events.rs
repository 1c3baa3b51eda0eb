//! Webhook event types and payloads.
//!
//! Webhooks are delivered as CloudEvents; the `type` attribute carries one of
//! the `ag.*` tokens below and `data` one of the payload structs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::cards::null_as_default;
use crate::enums::{wire_enum, AccessPassState, DeviceStatus, DeviceType, Platform, Protocol};

wire_enum! {
    /// Access pass lifecycle events.
    pub enum AccessPassEventType {
        /// Pass issued
        Issued => "ag.access_pass.issued",
        /// Pass viewed
        Viewed => "ag.access_pass.viewed",
        /// Pass updated
        Updated => "ag.access_pass.updated",
        /// Pass suspended
        Suspended => "ag.access_pass.suspended",
        /// Pass resumed
        Resumed => "ag.access_pass.resumed",
        /// Pass unlinked
        Unlinked => "ag.access_pass.unlinked",
        /// Pass deleted
        Deleted => "ag.access_pass.deleted",
        /// Pass installed on another device
        DeviceAdded => "ag.access_pass.device_added",
        /// Pass removed from a device
        DeviceRemoved => "ag.access_pass.device_removed",
        /// Pass reached its expiration date
        Expired => "ag.access_pass.expired",
    }
}

wire_enum! {
    /// Card template events.
    pub enum CardTemplateEventType {
        /// Template created
        Created => "ag.card_template.created",
        /// Template updated
        Updated => "ag.card_template.updated",
        /// Publishing requested
        RequestPublishing => "ag.card_template.request_publishing",
        /// Template published
        Published => "ag.card_template.published",
    }
}

wire_enum! {
    /// Landing page events.
    pub enum LandingPageEventType {
        /// Landing page created
        Created => "ag.landing_page.created",
        /// Landing page updated
        Updated => "ag.landing_page.updated",
        /// Landing page attached to a template
        AttachedToTemplate => "ag.landing_page.attached_to_template",
    }
}

wire_enum! {
    /// Credential profile events.
    pub enum CredentialProfileEventType {
        /// Profile created
        Created => "ag.credential_profile.created",
        /// Profile attached to a template
        AttachedToTemplate => "ag.credential_profile.attached_to_template",
    }
}

wire_enum! {
    /// HID organization events.
    pub enum HidOrgEventType {
        /// Organization created
        Created => "ag.hid_org.created",
        /// Organization activated
        Activated => "ag.hid_org.activated",
    }
}

wire_enum! {
    /// Account balance events.
    pub enum AccountBalanceEventType {
        /// Balance fell below the warning threshold
        Low => "ag.account_balance.low",
    }
}

/// Per-platform card inside an access pass event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPassEventDetails {
    /// Card identifier
    pub id: String,
    /// Template the card belongs to
    pub card_template_id: String,
    /// Wallet platform
    pub platform: Platform,
    /// Credential protocol
    pub protocol: Protocol,
    /// Card status
    pub status: String,
    /// H10301 card number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// H10301 site code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
}

/// Template summary inside an access pass event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPassEventCardTemplate {
    /// Template identifier
    pub id: String,
    /// Wallet platform
    pub platform: Platform,
    /// Credential protocol
    pub protocol: Protocol,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// HID organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hid_org_id: Option<String>,
}

/// Device inside an access pass event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPassEventDevice {
    /// Device identifier
    pub id: String,
    /// Template the credential belongs to
    pub card_template_id: String,
    /// Wallet platform
    pub platform: Platform,
    /// Device family
    #[serde(rename = "type")]
    pub device_type: DeviceType,
    /// Credential protocol
    pub protocol: Protocol,
    /// Provisioning status
    pub status: DeviceStatus,
    /// H10301 card number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// H10301 site code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_code: Option<String>,
}

/// `data` of an `ag.access_pass.*` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPassEvent {
    /// Pass identifier
    pub id: String,
    /// Template the pass was issued from
    pub card_template_id: String,
    /// Lifecycle state after the event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<AccessPassState>,
    /// Holder's full name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Employee identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    /// Holder's title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// When the pass becomes valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// When the pass expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// HID organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hid_org_id: Option<String>,
    /// Templates involved (one per platform for template pairs)
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub card_templates: Vec<AccessPassEventCardTemplate>,
    /// Card details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<AccessPassEventDetails>,
    /// Devices holding the pass
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub devices: Vec<AccessPassEventDevice>,
}

/// `data` of an `ag.card_template.*` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardTemplateEvent {
    /// Template identifier
    #[serde(rename = "card_template_id")]
    pub id: String,
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Wallet platform
    pub platform: Platform,
    /// Credential protocol
    pub protocol: Protocol,
    /// Free-form metadata
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// HID organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hid_org_id: Option<String>,
}

/// `data` of an `ag.credential_profile.*` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialProfileEvent {
    /// Credential profile identifier
    #[serde(rename = "credential_profile_id")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_tokens() {
        assert_eq!(
            "ag.access_pass.device_added".parse::<AccessPassEventType>(),
            Ok(AccessPassEventType::DeviceAdded)
        );
        assert_eq!(
            CardTemplateEventType::RequestPublishing.as_str(),
            "ag.card_template.request_publishing"
        );
        assert_eq!(AccountBalanceEventType::Low.to_string(), "ag.account_balance.low");
        assert!("ag.hid_org.deleted".parse::<HidOrgEventType>().is_err());
    }

    #[test]
    fn access_pass_event_payload() {
        let raw = r#"{
            "id": "pass1",
            "card_template_id": "tpl1",
            "state": "suspended",
            "full_name": "Jane Doe",
            "start_date": "2025-01-01T00:00:00Z",
            "card_templates": [
                {"id": "tpl1", "platform": "apple", "protocol": "desfire"}
            ],
            "details": {
                "id": "c1", "card_template_id": "tpl1", "platform": "apple",
                "protocol": "desfire", "status": "active", "site_code": "42"
            },
            "devices": [
                {"id": "d1", "card_template_id": "tpl1", "platform": "apple",
                 "type": "apple_watch", "protocol": "desfire", "status": "installed"}
            ]
        }"#;

        let event: AccessPassEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.state, Some(AccessPassState::Suspended));
        assert_eq!(event.card_templates[0].platform, Platform::Apple);
        assert_eq!(event.details.unwrap().site_code.as_deref(), Some("42"));
        assert_eq!(event.devices[0].device_type, DeviceType::AppleWatch);
        assert_eq!(event.devices[0].status, DeviceStatus::Installed);
    }

    #[test]
    fn access_pass_event_null_lists() {
        let raw = r#"{"id": "pass1", "card_template_id": "tpl1", "card_templates": null, "devices": null}"#;
        let event: AccessPassEvent = serde_json::from_str(raw).unwrap();
        assert!(event.card_templates.is_empty());
        assert!(event.devices.is_empty());
    }

    #[test]
    fn template_and_profile_events() {
        let event: CardTemplateEvent = serde_json::from_str(
            r#"{"card_template_id": "tpl1", "platform": "android", "protocol": "smart_tap"}"#,
        )
        .unwrap();
        assert_eq!(event.id, "tpl1");
        assert_eq!(event.protocol, Protocol::SmartTap);

        let event: CredentialProfileEvent =
            serde_json::from_str(r#"{"credential_profile_id": "cp1"}"#).unwrap();
        assert_eq!(event.id, "cp1");
    }
}
