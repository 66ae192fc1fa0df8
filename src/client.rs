//! Walmart Marketplace client.

use crate::auth::cache::TokenCache;
use crate::auth::{AuthenticationProvider, TokenProvider};
use crate::builder::MarketplaceBuilder;
use crate::config::MarketplaceConfig;
use crate::error::MarketplaceError;
use crate::execution::RequestExecutor;
use crate::execution::http::interceptor::HttpInterceptor;
use crate::services::{Authentication, Inventory, Items, Orders, Prices, Reports};
use std::sync::Arc;

/// Entry point to every marketplace service.
///
/// Cloning is cheap; clones share configuration, HTTP client and token cache.
#[derive(Clone)]
pub struct WalmartMarketplace {
    config: Arc<MarketplaceConfig>,
    auth: Arc<AuthenticationProvider>,
    cache: Arc<dyn TokenCache>,
    executor: RequestExecutor,
}

impl std::fmt::Debug for WalmartMarketplace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalmartMarketplace")
            .field("base_url", &self.config.base_url)
            .field("service_name", &self.config.service_name)
            .finish_non_exhaustive()
    }
}

impl WalmartMarketplace {
    /// Client with default transport settings and the shared token cache.
    pub fn new(config: MarketplaceConfig) -> Result<Self, MarketplaceError> {
        MarketplaceBuilder::from_config(config).build()
    }

    /// Client configured from `WALMART_CLIENT_ID`, `WALMART_CLIENT_SECRET`
    /// and `WALMART_BASE_URL`.
    pub fn from_env() -> Result<Self, MarketplaceError> {
        Self::new(MarketplaceConfig::from_env())
    }

    pub fn builder() -> MarketplaceBuilder {
        MarketplaceBuilder::new()
    }

    pub(crate) fn from_parts(
        config: Arc<MarketplaceConfig>,
        http: reqwest::Client,
        auth: Arc<AuthenticationProvider>,
        tokens: Arc<dyn TokenProvider>,
        cache: Arc<dyn TokenCache>,
        interceptors: Vec<Arc<dyn HttpInterceptor>>,
    ) -> Self {
        let executor = RequestExecutor::new(config.clone(), http, tokens, interceptors);
        Self {
            config,
            auth,
            cache,
            executor,
        }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    /// The token cache this client reads and writes.
    pub fn token_cache(&self) -> &Arc<dyn TokenCache> {
        &self.cache
    }

    pub fn authentication(&self) -> Authentication {
        Authentication::new(self.auth.clone())
    }

    pub fn inventory(&self) -> Inventory {
        Inventory::new(self.executor.clone())
    }

    pub fn items(&self) -> Items {
        Items::new(self.executor.clone())
    }

    pub fn orders(&self) -> Orders {
        Orders::new(self.executor.clone())
    }

    pub fn prices(&self) -> Prices {
        Prices::new(self.executor.clone())
    }

    pub fn reports(&self) -> Reports {
        Reports::new(self.executor.clone())
    }
}
