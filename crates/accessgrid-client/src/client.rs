//! Request dispatcher.
//!
//! Every call goes through the same pipeline: derive the canonical payload,
//! sign it, mirror it into `sig_payload` when the request has no body, attach
//! the auth headers, send, and classify the response.

use accessgrid_core::{build_payload, sign, SIG_PAYLOAD_PARAM};
use serde::de::DeserializeOwned;

use crate::cards::AccessCards;
use crate::config::{ClientConfig, Credentials};
use crate::console::Console;
use crate::encoding::{append_query, set_query_param};
use crate::error::{AccessGridError, Result};
use crate::request::RequestDescriptor;
use crate::response;
use crate::transport::{HttpTransport, OutboundRequest, Transport, TransportError};

/// Header carrying the account identifier.
pub const ACCOUNT_ID_HEADER: &str = "X-ACCT-ID";
/// Header carrying the hex payload signature.
pub const SIGNATURE_HEADER: &str = "X-PAYLOAD-SIG";
/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the AccessGrid API.
///
/// Credentials are fixed at construction. The client holds no per-request
/// state, so a shared reference can drive any number of concurrent calls.
#[derive(Debug)]
pub struct AccessGridClient<T = HttpTransport> {
    transport: T,
    credentials: Credentials,
    base_url: String,
}

impl AccessGridClient<HttpTransport> {
    /// Create a client backed by [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`AccessGridError::Configuration`] if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.transport()).map_err(|e| match e {
            TransportError::Init(message) => AccessGridError::Configuration(message),
            other => AccessGridError::Transport(other),
        })?;
        Self::with_transport(&config, transport)
    }

    /// Create a client from `ACCESSGRID_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGridError::Configuration`] if a variable is malformed
    /// or credentials are missing.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }
}

impl<T: Transport> AccessGridClient<T> {
    /// Create a client over a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGridError::Configuration`] if the configuration is
    /// invalid.
    pub fn with_transport(config: &ClientConfig, transport: T) -> Result<Self> {
        let (credentials, base_url) = config.validate()?;
        tracing::debug!(
            account_id = %credentials.account_id,
            base_url = %base_url,
            "Created AccessGrid client"
        );
        Ok(Self {
            transport,
            credentials,
            base_url,
        })
    }

    /// Card issuance and lifecycle operations.
    #[must_use]
    pub fn access_cards(&self) -> AccessCards<'_, T> {
        AccessCards::new(self)
    }

    /// Enterprise console operations.
    #[must_use]
    pub fn console(&self) -> Console<'_, T> {
        Console::new(self)
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The transport requests are sent through.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Account the client signs for.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.credentials.account_id
    }

    /// Sign a request and turn it into what the transport sends.
    ///
    /// A body on a `GET` is dropped: it is neither signed nor sent.
    #[must_use]
    pub fn prepare(&self, request: &RequestDescriptor) -> OutboundRequest {
        let method = request.method;
        let body = request.body.as_deref().filter(|_| method.allows_body());

        let payload = build_payload(method, &request.path, body);
        let signature = sign(payload.as_str(), &self.credentials.secret_key);

        let mut query = request.query.clone();
        if let Some(mirror) = payload.sig_payload() {
            set_query_param(&mut query, SIG_PAYLOAD_PARAM, mirror);
        }

        let separator = if request.path.starts_with('/') { "" } else { "/" };
        let url = append_query(
            &format!("{}{separator}{}", self.base_url, request.path),
            &query,
        );

        let mut headers = vec![
            (ACCOUNT_ID_HEADER, self.credentials.account_id.clone()),
            (SIGNATURE_HEADER, signature.into_string()),
            ("User-Agent", USER_AGENT.to_string()),
        ];
        if body.is_some() {
            headers.push(("Content-Type", "application/json".to_string()));
        }

        OutboundRequest {
            method,
            url,
            headers,
            body: body.map(str::to_string),
            timeout: request.timeout,
        }
    }

    /// Send a request and return the raw body of a successful response.
    ///
    /// Used where the caller must inspect the body before choosing a type.
    ///
    /// # Errors
    ///
    /// Returns the transport failure, or the classified failure of a non-2xx
    /// response.
    pub async fn dispatch_raw(&self, request: RequestDescriptor) -> Result<String> {
        let outbound = self.prepare(&request);

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            params = request.query.len(),
            "Dispatching request"
        );

        let response = match self.transport.send(outbound).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %e,
                    "Transport failure"
                );
                return Err(e.into());
            }
        };

        tracing::debug!(status = response.status, path = %request.path, "Received response");
        if !(200..300).contains(&response.status) {
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                "Request failed"
            );
        }

        response::classify_raw(response.status, response.body)
    }

    /// Send a request and parse a successful response as `R`.
    ///
    /// # Errors
    ///
    /// As [`dispatch_raw`](Self::dispatch_raw), plus
    /// [`AccessGridError::Deserialization`] if the body is not a valid `R`.
    pub async fn dispatch<R: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<R> {
        let body = self.dispatch_raw(request).await?;
        response::parse_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::TransportResponse;
    use accessgrid_core::{HttpMethod, SecretKey};

    #[derive(Debug)]
    struct Fixed(u16, &'static str);

    impl Transport for Fixed {
        async fn send(
            &self,
            _request: OutboundRequest,
        ) -> std::result::Result<TransportResponse, TransportError> {
            Ok(TransportResponse {
                status: self.0,
                body: self.1.to_string(),
            })
        }
    }

    fn client(status: u16, body: &'static str) -> AccessGridClient<Fixed> {
        let config = ClientConfig::new("acct-1", "test-secret")
            .with_base_url("https://api.example.com/");
        AccessGridClient::with_transport(&config, Fixed(status, body)).unwrap()
    }

    #[test]
    fn user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("accessgrid-client/"));
    }

    #[test]
    fn construction_validates_credentials() {
        let config = ClientConfig::new("", "secret");
        let err = AccessGridClient::with_transport(&config, Fixed(200, "")).unwrap_err();
        assert!(matches!(err, AccessGridError::Configuration(_)));
    }

    #[test]
    fn prepare_get_mirrors_payload() {
        let outbound = client(200, "").prepare(&RequestDescriptor::get("/v1/key-cards/abc123"));

        assert_eq!(
            outbound.url,
            "https://api.example.com/v1/key-cards/abc123?sig_payload=%7B%22id%22%3A%20%22abc123%22%7D"
        );
        assert_eq!(outbound.header("X-ACCT-ID"), Some("acct-1"));
        assert_eq!(
            outbound.header("X-PAYLOAD-SIG"),
            Some("b1f39c874712623fc65ddbb444ec1686d53437a0a5fbbf88bff28588e5df0cd1")
        );
        assert_eq!(outbound.header("Content-Type"), None);
        assert!(outbound.body.is_none());
    }

    #[test]
    fn prepare_post_signs_body() {
        let body = r#"{"card_template_id":"0xd3adb00b5","full_name":"Jane Doe"}"#;
        let request = RequestDescriptor {
            body: Some(body.to_string()),
            ..RequestDescriptor::post("/v1/key-cards")
        };
        let outbound = client(200, "").prepare(&request);

        assert_eq!(outbound.url, "https://api.example.com/v1/key-cards");
        assert_eq!(outbound.body.as_deref(), Some(body));
        assert_eq!(outbound.header("Content-Type"), Some("application/json"));
        assert_eq!(
            outbound.header("X-PAYLOAD-SIG").map(str::to_string),
            Some(sign(body, &SecretKey::new("test-secret")).into_string())
        );
    }

    #[test]
    fn prepare_null_body_action_is_mirrored() {
        let request = RequestDescriptor::post("/v1/key-cards/abc123/suspend")
            .with_json(&serde_json::Value::Null)
            .unwrap();
        let outbound = client(200, "").prepare(&request);

        assert!(outbound.body.is_none());
        assert_eq!(outbound.header("Content-Type"), None);
        assert!(outbound
            .url
            .ends_with("?sig_payload=%7B%22id%22%3A%20%22abc123%22%7D"));
    }

    #[test]
    fn prepare_drops_get_body() {
        let request = RequestDescriptor {
            body: Some("{}".to_string()),
            ..RequestDescriptor::get("/v1/console/card-templates/tpl-1")
        };
        let outbound = client(200, "").prepare(&request);
        assert_eq!(outbound.method, HttpMethod::Get);
        assert!(outbound.body.is_none());
    }

    #[test]
    fn prepare_adds_missing_slash() {
        let outbound = client(200, "").prepare(&RequestDescriptor::get("v1/key-cards"));
        assert!(outbound.url.starts_with("https://api.example.com/v1/key-cards?"));
    }

    #[test]
    fn dispatch_parses_success() {
        let client = client(200, r#"{"id":"abc123","state":"active"}"#);
        let value: serde_json::Value =
            tokio_test::block_on(client.dispatch(RequestDescriptor::get("/v1/key-cards/abc123")))
                .unwrap();
        assert_eq!(value["state"], "active");
    }

    #[test]
    fn dispatch_raw_classifies_failure() {
        let client = client(402, "no funds");
        let err = tokio_test::block_on(
            client.dispatch_raw(RequestDescriptor::post("/v1/key-cards/abc123/resume")),
        )
        .unwrap_err();
        assert!(matches!(err, AccessGridError::InsufficientBalance));
    }
}
