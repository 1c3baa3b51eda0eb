//! Card templates and their event logs (enterprise console).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{DeviceKind, Platform, Protocol, TemplateEventType};

/// A card template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Template identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name in the console
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Wallet platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Use case, e.g. `employee_badge`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
    /// Credential protocol
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Creation time as reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last publication time as reported by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_published_at: Option<String>,
    /// Keys issued from this template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_keys_count: Option<u64>,
    /// Keys currently active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_keys_count: Option<u64>,
    /// Per-device-class limits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_device_counts: Option<Value>,
    /// Support settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_settings: Option<Value>,
    /// Terms settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_settings: Option<Value>,
    /// Style settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_settings: Option<Value>,
}

/// Visual design of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDesign {
    /// Background color, `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Label color, `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    /// Secondary label color, `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_secondary_color: Option<String>,
    /// Base64 encoded background image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Base64 encoded logo image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_image: Option<String>,
    /// Base64 encoded icon image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_image: Option<String>,
}

/// Support information printed on the back of issued keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportInfo {
    /// Support URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_url: Option<String>,
    /// Support phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_phone_number: Option<String>,
    /// Support email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    /// Privacy policy URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_policy_url: Option<String>,
    /// Terms and conditions URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_and_conditions_url: Option<String>,
}

/// Body of `POST /v1/console/card-templates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    /// Display name in the console
    pub name: String,
    /// Wallet platform
    pub platform: Platform,
    /// Use case; the API currently accepts `employee_badge`
    pub use_case: String,
    /// Credential protocol
    pub protocol: Protocol,
    /// Allow keys on several devices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_on_multiple_devices: Option<bool>,
    /// Watches per key, 1-5 (multi-device only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_count: Option<u8>,
    /// Phones per key, 1-5 (multi-device only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iphone_count: Option<u8>,
    /// Visual design
    #[serde(skip_serializing_if = "Option::is_none")]
    pub design: Option<TemplateDesign>,
    /// Support information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_info: Option<SupportInfo>,
}

impl CreateTemplateRequest {
    /// Use case assigned by [`CreateTemplateRequest::new`].
    pub const EMPLOYEE_BADGE: &'static str = "employee_badge";

    /// Start an employee badge template.
    #[must_use]
    pub fn new(name: impl Into<String>, platform: Platform, protocol: Protocol) -> Self {
        Self {
            name: name.into(),
            platform,
            use_case: Self::EMPLOYEE_BADGE.to_string(),
            protocol,
            allow_on_multiple_devices: None,
            watch_count: None,
            iphone_count: None,
            design: None,
            support_info: None,
        }
    }
}

/// Body of `PUT /v1/console/card-templates/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    /// Template to update; also determines the request path
    pub card_template_id: String,
    /// Display name in the console
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Allow keys on several devices
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_on_multiple_devices: Option<bool>,
    /// Watches per key, 1-5 (multi-device only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watch_count: Option<u8>,
    /// Phones per key, 1-5 (multi-device only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iphone_count: Option<u8>,
    /// Support information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_info: Option<SupportInfo>,
}

impl UpdateTemplateRequest {
    /// Start an update of the given template.
    #[must_use]
    pub fn new(card_template_id: impl Into<String>) -> Self {
        Self {
            card_template_id: card_template_id.into(),
            ..Default::default()
        }
    }
}

/// Filters for `GET /v1/console/card-templates/{id}/logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLogFilters {
    /// Only events from this device class
    pub device: Option<DeviceKind>,
    /// Only events at or after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Only events at or before this instant
    pub end_date: Option<DateTime<Utc>>,
    /// Only events of this kind
    pub event_type: Option<TemplateEventType>,
}

/// One entry of a template's event log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    /// Event kind
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// When the event happened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Acting user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Event-specific fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the event log endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLogResponse {
    /// Log entries; `null` or absent when there are none
    #[serde(default)]
    pub events: Option<Vec<EventLogEntry>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_wire_form() {
        let mut request = CreateTemplateRequest::new("Badge", Platform::Apple, Protocol::Desfire);
        request.design = Some(TemplateDesign {
            background_color: Some("#FFFFFF".to_string()),
            ..Default::default()
        });

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Badge",
                "platform": "apple",
                "use_case": "employee_badge",
                "protocol": "desfire",
                "design": {"background_color": "#FFFFFF"}
            })
        );
    }

    #[test]
    fn update_request_keeps_template_id() {
        let mut request = UpdateTemplateRequest::new("tpl_1");
        request.watch_count = Some(2);

        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"card_template_id":"tpl_1","watch_count":2}"#);
    }

    #[test]
    fn template_deserializes() {
        let raw = r##"{
            "id": "tpl_1",
            "name": "Badge",
            "platform": "apple",
            "protocol": "desfire",
            "issued_keys_count": 12,
            "active_keys_count": 9,
            "style_settings": {"background_color": "#000000"}
        }"##;
        let template: Template = serde_json::from_str(raw).unwrap();
        assert_eq!(template.id.as_deref(), Some("tpl_1"));
        assert_eq!(template.issued_keys_count, Some(12));
        assert!(template.style_settings.is_some());
    }

    #[test]
    fn event_log_keeps_extra_fields() {
        let raw = r#"{"events": [
            {"type": "install", "timestamp": "2025-03-01T10:00:00Z", "user_id": "u1", "device": "mobile"}
        ]}"#;
        let response: EventLogResponse = serde_json::from_str(raw).unwrap();
        let events = response.events.unwrap();
        assert_eq!(events[0].event_type, "install");
        assert_eq!(events[0].user_id.as_deref(), Some("u1"));
        assert_eq!(events[0].extra.get("device"), Some(&Value::from("mobile")));
    }
}
