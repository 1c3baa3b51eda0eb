//! HTTP transport seam.
//!
//! The dispatcher hands a fully signed [`OutboundRequest`] to a [`Transport`]
//! and gets back a status code and body text. Connection pooling, TLS and
//! timeouts live here; retries do not live anywhere in this crate.

use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use accessgrid_core::HttpMethod;
use reqwest::Client;

/// A signed request ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Absolute URL including the encoded query string
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(&'static str, String)>,
    /// JSON body, for methods that carry one
    pub body: Option<String>,
    /// Per-request timeout overriding the transport default
    pub timeout: Option<Duration>,
}

impl OutboundRequest {
    /// First value of a header, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

/// Sends signed requests.
///
/// Dropping the returned future cancels the exchange.
pub trait Transport: Send + Sync {
    /// Send one request and read the whole response body.
    fn send(
        &self,
        request: OutboundRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

/// Configuration for [`HttpTransport`].
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Default request timeout
    pub timeout: Duration,
    /// Custom CA certificate path (PEM format)
    pub ca_cert_path: Option<PathBuf>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            ca_cert_path: None,
        }
    }
}

/// [`Transport`] backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created, or if the CA
    /// certificate cannot be read or parsed.
    pub fn new(config: &HttpTransportConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .use_rustls_tls();

        if let Some(ca_path) = &config.ca_cert_path {
            let ca_cert = fs::read(ca_path).map_err(|e| {
                TransportError::Init(format!(
                    "failed to read CA certificate {}: {e}",
                    ca_path.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&ca_cert)
                .map_err(|e| TransportError::Init(format!("failed to parse CA certificate: {e}")))?;
            builder = builder.add_root_certificate(cert);
            tracing::debug!(ca_path = %ca_path.display(), "Loaded custom CA certificate");
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Init(e.to_string()))?;

        Ok(Self { client })
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(Self::method(request.method), &request.url);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::from)?;

        Ok(TransportResponse { status, body })
    }
}

/// Errors raised by a transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// Transport initialization failed
    #[error("transport init error: {0}")]
    Init(String),
    /// The request could not be sent or the response not read
    #[error("request error: {0}")]
    Request(String),
    /// The request exceeded its timeout
    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(e.to_string())
        }
    }
}
