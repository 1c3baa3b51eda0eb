//! Access card operations: `/v1/key-cards`.

use accessgrid_models::paths::{self, CardAction};
use accessgrid_models::{
    AccessCard, IssuedCard, KeysListResponse, ListKeysRequest, ProvisionCardRequest,
    UpdateCardRequest,
};

use crate::client::AccessGridClient;
use crate::error::{AccessGridError, Result};
use crate::request::RequestDescriptor;
use crate::transport::Transport;

/// Card issuance and lifecycle, obtained from
/// [`AccessGridClient::access_cards`].
#[derive(Debug)]
pub struct AccessCards<'a, T> {
    client: &'a AccessGridClient<T>,
}

impl<'a, T: Transport> AccessCards<'a, T> {
    pub(crate) fn new(client: &'a AccessGridClient<T>) -> Self {
        Self { client }
    }

    /// Issue a card from a template.
    ///
    /// Template pairs answer with a unified pass; everything else with a
    /// single card.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure, or [`AccessGridError::Deserialization`]
    /// if the response matches neither shape.
    pub async fn issue(&self, request: &ProvisionCardRequest) -> Result<IssuedCard> {
        let descriptor = RequestDescriptor::post(paths::key_cards()).with_json(request)?;
        let raw = self.client.dispatch_raw(descriptor).await?;
        IssuedCard::from_json(&raw).map_err(AccessGridError::Deserialization)
    }

    /// Alias of [`issue`](Self::issue).
    ///
    /// # Errors
    ///
    /// See [`issue`](Self::issue).
    pub async fn provision(&self, request: &ProvisionCardRequest) -> Result<IssuedCard> {
        self.issue(request).await
    }

    /// Fetch one card.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn get(&self, card_id: &str) -> Result<AccessCard> {
        self.client
            .dispatch(RequestDescriptor::get(paths::key_card(card_id)))
            .await
    }

    /// Change holder details of a card.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn update(&self, card_id: &str, request: &UpdateCardRequest) -> Result<AccessCard> {
        let descriptor = RequestDescriptor::patch(paths::key_card(card_id)).with_json(request)?;
        self.client.dispatch(descriptor).await
    }

    /// List the cards of a template, optionally in one state.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn list(&self, request: &ListKeysRequest) -> Result<Vec<AccessCard>> {
        let descriptor = RequestDescriptor::get(paths::key_cards())
            .with_optional_query("template_id", request.template_id.as_deref())
            .with_optional_query("state", request.state.map(|state| state.as_str()));

        let response: KeysListResponse = self.client.dispatch(descriptor).await?;
        Ok(response.keys.unwrap_or_default())
    }

    /// Temporarily disable a card.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn suspend(&self, card_id: &str) -> Result<AccessCard> {
        self.manage(card_id, CardAction::Suspend).await
    }

    /// Re-enable a suspended card.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn resume(&self, card_id: &str) -> Result<AccessCard> {
        self.manage(card_id, CardAction::Resume).await
    }

    /// Detach a card from its holder's devices.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn unlink(&self, card_id: &str) -> Result<AccessCard> {
        self.manage(card_id, CardAction::Unlink).await
    }

    /// Permanently delete a card.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn delete(&self, card_id: &str) -> Result<AccessCard> {
        self.manage(card_id, CardAction::Delete).await
    }

    async fn manage(&self, card_id: &str, action: CardAction) -> Result<AccessCard> {
        tracing::debug!(card_id, action = action.as_str(), "Changing card state");
        self.client
            .dispatch(RequestDescriptor::post(paths::key_card_action(card_id, action)))
            .await
    }
}
