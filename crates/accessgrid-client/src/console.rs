//! Enterprise console operations: `/v1/console/card-templates`.

use accessgrid_models::paths;
use accessgrid_models::{
    CreateTemplateRequest, EventLogEntry, EventLogFilters, EventLogResponse, Template,
    UpdateTemplateRequest,
};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::client::AccessGridClient;
use crate::error::Result;
use crate::request::RequestDescriptor;
use crate::transport::Transport;

/// Template management, obtained from [`AccessGridClient::console`].
#[derive(Debug)]
pub struct Console<'a, T> {
    client: &'a AccessGridClient<T>,
}

impl<'a, T: Transport> Console<'a, T> {
    pub(crate) fn new(client: &'a AccessGridClient<T>) -> Self {
        Self { client }
    }

    /// Create a card template.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn create_template(&self, request: &CreateTemplateRequest) -> Result<Template> {
        let descriptor = RequestDescriptor::post(paths::card_templates()).with_json(request)?;
        self.client.dispatch(descriptor).await
    }

    /// Update the template named by `request.card_template_id`.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn update_template(&self, request: &UpdateTemplateRequest) -> Result<Template> {
        let descriptor = RequestDescriptor::put(paths::card_template(&request.card_template_id))
            .with_json(request)?;
        self.client.dispatch(descriptor).await
    }

    /// Fetch a template.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn read_template(&self, template_id: &str) -> Result<Template> {
        self.client
            .dispatch(RequestDescriptor::get(paths::card_template(template_id)))
            .await
    }

    /// Fetch a template's event log.
    ///
    /// # Errors
    ///
    /// Returns any dispatch failure.
    pub async fn event_log(
        &self,
        template_id: &str,
        filters: Option<&EventLogFilters>,
    ) -> Result<Vec<EventLogEntry>> {
        let mut descriptor = RequestDescriptor::get(paths::card_template_logs(template_id));
        if let Some(filters) = filters {
            descriptor = descriptor
                .with_optional_query("device", filters.device.map(|d| d.as_str()))
                .with_optional_query("start_date", filters.start_date.map(format_date))
                .with_optional_query("end_date", filters.end_date.map(format_date))
                .with_optional_query("event_type", filters.event_type.map(|e| e.as_str()));
        }

        let response: EventLogResponse = self.client.dispatch(descriptor).await?;
        Ok(response.events.unwrap_or_default())
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn dates_are_iso8601_utc() {
        let date = Utc.with_ymd_and_hms(2025, 1, 31, 8, 30, 0).unwrap();
        assert_eq!(format_date(date), "2025-01-31T08:30:00Z");
    }
}
