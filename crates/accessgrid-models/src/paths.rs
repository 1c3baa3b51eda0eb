//! Endpoint paths.
//!
//! Path structure: `/{version}/key-cards[/{card_id}[/{action}]]` and
//! `/{version}/console/card-templates[/{template_id}[/logs]]`.
//!
//! Identifiers are inserted verbatim. The signing payload of bodiless requests
//! is derived from these segments, so they must reach the server unchanged.

/// API version prefix.
pub const API_VERSION: &str = "v1";

/// State transitions triggered by a bodiless `POST` on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardAction {
    /// Temporarily disable
    Suspend,
    /// Re-enable a suspended card
    Resume,
    /// Detach from the holder's device
    Unlink,
    /// Remove permanently
    Delete,
}

impl CardAction {
    /// Path segment for this action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suspend => "suspend",
            Self::Resume => "resume",
            Self::Unlink => "unlink",
            Self::Delete => "delete",
        }
    }
}

/// `/v1/key-cards`
#[must_use]
pub fn key_cards() -> String {
    format!("/{API_VERSION}/key-cards")
}

/// `/v1/key-cards/{card_id}`
#[must_use]
pub fn key_card(card_id: &str) -> String {
    format!("{}/{card_id}", key_cards())
}

/// `/v1/key-cards/{card_id}/{action}`
#[must_use]
pub fn key_card_action(card_id: &str, action: CardAction) -> String {
    format!("{}/{}", key_card(card_id), action.as_str())
}

/// `/v1/console/card-templates`
#[must_use]
pub fn card_templates() -> String {
    format!("/{API_VERSION}/console/card-templates")
}

/// `/v1/console/card-templates/{template_id}`
#[must_use]
pub fn card_template(template_id: &str) -> String {
    format!("{}/{template_id}", card_templates())
}

/// `/v1/console/card-templates/{template_id}/logs`
#[must_use]
pub fn card_template_logs(template_id: &str) -> String {
    format!("{}/logs", card_template(template_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_paths() {
        assert_eq!(key_cards(), "/v1/key-cards");
        assert_eq!(key_card("0xc4rd"), "/v1/key-cards/0xc4rd");
        assert_eq!(
            key_card_action("0xc4rd", CardAction::Suspend),
            "/v1/key-cards/0xc4rd/suspend"
        );
        assert_eq!(
            key_card_action("0xc4rd", CardAction::Delete),
            "/v1/key-cards/0xc4rd/delete"
        );
    }

    #[test]
    fn template_paths() {
        assert_eq!(card_templates(), "/v1/console/card-templates");
        assert_eq!(card_template("tpl_1"), "/v1/console/card-templates/tpl_1");
        assert_eq!(
            card_template_logs("tpl_1"),
            "/v1/console/card-templates/tpl_1/logs"
        );
    }
}
