//! Authentication service.

use crate::auth::{AccessToken, AuthenticationProvider};
use crate::error::MarketplaceError;
use crate::options::RequestOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct Authentication {
    provider: Arc<AuthenticationProvider>,
}

impl Authentication {
    pub(crate) fn new(provider: Arc<AuthenticationProvider>) -> Self {
        Self { provider }
    }

    /// Access token for this client's credentials and base URL.
    ///
    /// Served from the token cache while the cached token is unexpired;
    /// otherwise a single `POST /v3/token` is made and its result cached.
    pub async fn get_access_token(
        &self,
        options: &RequestOptions,
    ) -> Result<AccessToken, MarketplaceError> {
        self.provider.get_access_token(options).await
    }

    /// Cache key this client's tokens are stored under.
    pub fn cache_key(&self) -> String {
        self.provider.cache_key()
    }
}
