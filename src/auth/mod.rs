//! Authentication helpers and token providers.
//!
//! [`AuthenticationProvider`] performs the client-credentials exchange against
//! `{base_url}/v3/token` and caches the result in a [`TokenCache`].

use crate::error::MarketplaceError;
use crate::options::RequestOptions;
use serde::{Deserialize, Serialize};

pub mod cache;
pub mod provider;

pub use cache::{CachedAccessToken, InMemoryTokenCache, TokenCache, TokenCacheKey};
pub use provider::AuthenticationProvider;

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

/// Supplies the access token attached to every domain request.
///
/// Implementations may cache internally.
#[async_trait::async_trait]
pub trait TokenProvider: Send + Sync {
    async fn token(&self, options: &RequestOptions) -> Result<AccessToken, MarketplaceError>;
}

/// A fixed token, for callers that manage tokens themselves.
pub struct StaticTokenProvider {
    token: AccessToken,
}

impl StaticTokenProvider {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            token: AccessToken {
                access_token: access_token.into(),
                token_type: default_token_type(),
                expires_in: 0,
            },
        }
    }
}

#[async_trait::async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self, _options: &RequestOptions) -> Result<AccessToken, MarketplaceError> {
        Ok(self.token.clone())
    }
}
