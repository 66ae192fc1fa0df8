//! Client configuration.
//!
//! `MarketplaceConfig` is immutable once a client is built. Credentials are
//! optional here; the first call that needs them fails with a configuration
//! error when they are missing.

use crate::error::MarketplaceError;
use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;
use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://marketplace.walmartapis.com";
/// Sandbox API endpoint.
pub const SANDBOX_BASE_URL: &str = "https://sandbox.walmartapis.com";
/// Default value of the `WM_SVC.NAME` header.
pub const DEFAULT_SERVICE_NAME: &str = "Walmart Marketplace";

pub const ENV_CLIENT_ID: &str = "WALMART_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "WALMART_CLIENT_SECRET";
pub const ENV_BASE_URL: &str = "WALMART_BASE_URL";

/// HTTP transport settings used when the client builds its own `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct HttpConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
    /// Headers sent with every request.
    pub headers: HashMap<String, String>,
}

/// Marketplace client configuration.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<SecretString>,
    pub base_url: String,
    /// Sent as `WM_SVC.NAME`.
    pub service_name: String,
    /// Sent as `WM_CONSUMER.CHANNEL.TYPE` when set.
    pub channel_type: Option<String>,
    pub http: HttpConfig,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            channel_type: None,
            http: HttpConfig::default(),
        }
    }
}

impl MarketplaceConfig {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: Some(client_id.into()),
            client_secret: Some(SecretString::from(client_secret.into())),
            ..Default::default()
        }
    }

    /// Read credentials and base URL from `WALMART_CLIENT_ID`,
    /// `WALMART_CLIENT_SECRET` and `WALMART_BASE_URL`.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());
        Self {
            client_id: non_empty(ENV_CLIENT_ID),
            client_secret: non_empty(ENV_CLIENT_SECRET).map(SecretString::from),
            base_url: non_empty(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Both credentials, or a configuration error naming the missing one.
    pub fn credentials(&self) -> Result<(&str, &str), MarketplaceError> {
        let client_id = self
            .client_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                MarketplaceError::ConfigurationError("clientId is required".to_string())
            })?;
        let client_secret = self
            .client_secret
            .as_ref()
            .map(|s| s.expose_secret())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                MarketplaceError::ConfigurationError("clientSecret is required".to_string())
            })?;
        Ok((client_id, client_secret))
    }

    /// `{base_url}{path}`, exactly as composed before parsing.
    pub fn compose_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
