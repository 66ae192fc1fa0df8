//! Marketplace Client Builder
//!
//! Provides a builder pattern for creating [`WalmartMarketplace`] clients.
//! Building never touches the network; missing credentials are reported by
//! the first operation that needs them.

use crate::auth::cache::{InMemoryTokenCache, TokenCache};
use crate::auth::{AuthenticationProvider, TokenProvider};
use crate::client::WalmartMarketplace;
use crate::config::{HttpConfig, MarketplaceConfig, SANDBOX_BASE_URL};
use crate::error::MarketplaceError;
use crate::execution::http::client::build_http_client;
use crate::execution::http::interceptor::{HttpInterceptor, LoggingInterceptor};
use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

/// Walmart Marketplace client builder
#[derive(Clone, Default)]
pub struct MarketplaceBuilder {
    config: MarketplaceConfig,
    http_client: Option<reqwest::Client>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    http_debug: bool,
    token_cache: Option<Arc<dyn TokenCache>>,
    token_provider: Option<Arc<dyn TokenProvider>>,
}

impl MarketplaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: MarketplaceConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Set the client id
    pub fn client_id<S: Into<String>>(mut self, client_id: S) -> Self {
        self.config.client_id = Some(client_id.into());
        self
    }

    /// Set the client secret
    pub fn client_secret<S: Into<String>>(mut self, client_secret: S) -> Self {
        self.config.client_secret = Some(SecretString::from(client_secret.into()));
        self
    }

    /// Set the base URL. It is used verbatim, without normalization.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Target the sandbox environment.
    pub fn sandbox(self) -> Self {
        self.base_url(SANDBOX_BASE_URL)
    }

    /// Override the `WM_SVC.NAME` header value.
    pub fn service_name<S: Into<String>>(mut self, service_name: S) -> Self {
        self.config.service_name = service_name.into();
        self
    }

    /// Send `WM_CONSUMER.CHANNEL.TYPE` with every request.
    pub fn channel_type<S: Into<String>>(mut self, channel_type: S) -> Self {
        self.config.channel_type = Some(channel_type.into());
        self
    }

    // === HTTP Basic Configuration ===

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout = Some(timeout);
        self
    }

    /// Set connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.http.connect_timeout = Some(timeout);
        self
    }

    pub fn proxy<S: Into<String>>(mut self, proxy: S) -> Self {
        self.config.http.proxy = Some(proxy.into());
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.config.http.user_agent = Some(user_agent.into());
        self
    }

    /// Header sent with every request.
    pub fn default_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.config.http.headers.insert(name.into(), value.into());
        self
    }

    /// Replace all transport settings.
    pub fn http_config(mut self, http: HttpConfig) -> Self {
        self.config.http = http;
        self
    }

    /// Set custom HTTP client. Transport settings above are then ignored.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    // === HTTP Advanced Configuration ===

    /// Add a custom HTTP interceptor. Interceptors run in insertion order.
    pub fn with_http_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Enable the built-in logging interceptor (secrets masked).
    pub fn http_debug(mut self, enabled: bool) -> Self {
        self.http_debug = enabled;
        self
    }

    // === Token Configuration ===

    /// Use `cache` instead of the process-wide shared token cache.
    pub fn token_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
        self.token_cache = Some(cache);
        self
    }

    /// Supply access tokens for domain requests from `provider` instead of
    /// the client-credentials flow.
    pub fn token_provider(mut self, provider: Arc<dyn TokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<WalmartMarketplace, MarketplaceError> {
        let http = match self.http_client {
            Some(client) => client,
            None => build_http_client(&self.config.http)?,
        };

        let mut interceptors = self.interceptors;
        if self.http_debug {
            interceptors.push(Arc::new(LoggingInterceptor));
        }

        let cache = self
            .token_cache
            .unwrap_or_else(|| InMemoryTokenCache::shared() as Arc<dyn TokenCache>);
        let config = Arc::new(self.config);

        tracing::debug!(
            target: "walmart_marketplace::auth",
            base_url = %config.base_url,
            has_credentials = config.credentials().is_ok(),
            interceptors = interceptors.len(),
            "building marketplace client"
        );

        let auth = Arc::new(
            AuthenticationProvider::new(config.clone(), http.clone(), cache.clone())
                .with_interceptors(interceptors.clone()),
        );
        let tokens = self
            .token_provider
            .unwrap_or_else(|| auth.clone() as Arc<dyn TokenProvider>);

        Ok(WalmartMarketplace::from_parts(
            config,
            http,
            auth,
            tokens,
            cache,
            interceptors,
        ))
    }
}
