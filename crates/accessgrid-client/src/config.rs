//! Client configuration.

use std::path::PathBuf;
use std::time::Duration;

use accessgrid_core::SecretKey;
use url::Url;

use crate::error::{AccessGridError, Result};
use crate::transport::HttpTransportConfig;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.accessgrid.com";

/// Account credentials. Read-only for the life of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account identifier, sent as `X-ACCT-ID`
    pub account_id: String,
    /// Shared secret used to sign payloads
    pub secret_key: SecretKey,
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account identifier
    pub account_id: String,
    /// Shared secret
    pub secret_key: SecretKey,
    /// Base URL of the API (e.g., <https://api.accessgrid.com>)
    pub base_url: String,
    /// Default request timeout
    pub timeout: Duration,
    /// Custom CA certificate path (PEM format)
    pub ca_cert_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            secret_key: SecretKey::new(""),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            ca_cert_path: None,
        }
    }
}

impl ClientConfig {
    /// Configuration for an account against the default endpoint.
    #[must_use]
    pub fn new(account_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            secret_key: SecretKey::new(secret_key),
            ..Default::default()
        }
    }

    /// Use a different API endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Change the default request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Trust an additional CA certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ACCESSGRID_ACCOUNT_ID`: Account identifier
    /// - `ACCESSGRID_SECRET_KEY`: Shared secret
    /// - `ACCESSGRID_BASE_URL`: API endpoint (optional)
    /// - `ACCESSGRID_TIMEOUT_SECS`: Request timeout in seconds (optional)
    /// - `ACCESSGRID_CA_CERT`: Custom CA certificate path (optional)
    ///
    /// Missing credentials are reported when the client is constructed.
    ///
    /// # Errors
    ///
    /// Returns error if `ACCESSGRID_TIMEOUT_SECS` is not a whole number.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(account_id) = std::env::var("ACCESSGRID_ACCOUNT_ID") {
            config.account_id = account_id;
        }

        if let Ok(secret) = std::env::var("ACCESSGRID_SECRET_KEY") {
            config.secret_key = SecretKey::new(secret);
        }

        if let Ok(url) = std::env::var("ACCESSGRID_BASE_URL") {
            config.base_url = url;
        }

        if let Ok(secs) = std::env::var("ACCESSGRID_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                AccessGridError::Configuration(format!(
                    "invalid ACCESSGRID_TIMEOUT_SECS: {secs}"
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Ok(path) = std::env::var("ACCESSGRID_CA_CERT") {
            config.ca_cert_path = Some(PathBuf::from(path));
        }

        Ok(config)
    }

    /// Check the configuration and split it into credentials and a
    /// normalized base URL.
    ///
    /// # Errors
    ///
    /// Returns [`AccessGridError::Configuration`] if the account id or secret
    /// key is empty, or the base URL is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<(Credentials, String)> {
        if self.account_id.trim().is_empty() {
            return Err(AccessGridError::Configuration(
                "account id is required".to_string(),
            ));
        }
        if self.secret_key.is_empty() {
            return Err(AccessGridError::Configuration(
                "secret key is required".to_string(),
            ));
        }

        let base_url = self.base_url.trim_end_matches('/');
        let parsed = Url::parse(base_url).map_err(|e| {
            AccessGridError::Configuration(format!("invalid base URL {base_url}: {e}"))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(AccessGridError::Configuration(format!(
                "base URL must be an absolute http(s) URL: {base_url}"
            )));
        }

        let credentials = Credentials {
            account_id: self.account_id.clone(),
            secret_key: self.secret_key.clone(),
        };
        Ok((credentials, base_url.to_string()))
    }

    /// Transport settings derived from this configuration.
    #[must_use]
    pub fn transport(&self) -> HttpTransportConfig {
        HttpTransportConfig {
            timeout: self.timeout,
            ca_cert_path: self.ca_cert_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://api.accessgrid.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.account_id.is_empty());
        assert!(config.ca_cert_path.is_none());
    }

    #[test]
    fn validate_trims_trailing_slash() {
        let config = ClientConfig::new("acct", "secret").with_base_url("https://api.example.com/");
        let (credentials, base_url) = config.validate().unwrap();
        assert_eq!(base_url, "https://api.example.com");
        assert_eq!(credentials.account_id, "acct");
    }

    #[test]
    fn missing_account_id_fails() {
        let err = ClientConfig::new("", "secret").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("account id is required"));
    }

    #[test]
    fn missing_secret_key_fails() {
        let err = ClientConfig::new("acct", "").validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("secret key is required"));
    }

    #[test]
    fn invalid_base_url_fails() {
        for url in ["not a url", "ftp://api.example.com", "/v1"] {
            let err = ClientConfig::new("acct", "secret")
                .with_base_url(url)
                .validate()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Configuration, "{url}");
        }
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let config = ClientConfig::new("acct", "very-secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("very-secret-key"));
        assert!(debug.contains("acct"));
    }

    #[test]
    fn transport_settings() {
        let config = ClientConfig::new("acct", "secret")
            .with_timeout(Duration::from_secs(5))
            .with_ca_cert("/tmp/ca.pem");
        let transport = config.transport();
        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert_eq!(transport.ca_cert_path, Some(PathBuf::from("/tmp/ca.pem")));
    }
}
