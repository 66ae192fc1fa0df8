//! Client-credentials token provider.
//!
//! Flow per call:
//! 1. `{base_url}/v3/token` must parse, or `Failed to parse URL from ...`
//! 2. credentials present, or a configuration error (no network)
//! 3. cache hit under the base-URL key returns immediately
//! 4. one `POST` with Basic auth and `grant_type=client_credentials`
//! 5. the token is stored under the key with its `expires_in` as TTL
//!
//! Concurrent first calls are not coordinated; each may fetch and the last
//! write wins.

use super::cache::{TokenCache, TokenCacheKey};
use super::{AccessToken, TokenProvider};
use crate::config::MarketplaceConfig;
use crate::error::MarketplaceError;
use crate::execution::http::headers::HttpHeaderBuilder;
use crate::execution::http::interceptor::{HttpInterceptor, HttpRequestContext, apply_before_send};
use crate::execution::http::response::{classify_error_response, classify_send_error};
use crate::options::RequestOptions;
use crate::utils::url::parse_url;
use std::sync::Arc;

/// Path of the token endpoint, relative to the base URL.
pub const TOKEN_PATH: &str = "/v3/token";

pub struct AuthenticationProvider {
    config: Arc<MarketplaceConfig>,
    http: reqwest::Client,
    cache: Arc<dyn TokenCache>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl AuthenticationProvider {
    pub fn new(
        config: Arc<MarketplaceConfig>,
        http: reqwest::Client,
        cache: Arc<dyn TokenCache>,
    ) -> Self {
        Self {
            config,
            http,
            cache,
            interceptors: Vec::new(),
        }
    }

    pub fn with_interceptors(mut self, interceptors: Vec<Arc<dyn HttpInterceptor>>) -> Self {
        self.interceptors = interceptors;
        self
    }

    pub fn cache(&self) -> &Arc<dyn TokenCache> {
        &self.cache
    }

    /// Cache key for the configured base URL.
    pub fn cache_key(&self) -> String {
        TokenCacheKey::for_base_url(self.config.base_url.as_str()).as_cache_key()
    }

    /// A valid access token, from the cache when possible.
    pub async fn get_access_token(
        &self,
        options: &RequestOptions,
    ) -> Result<AccessToken, MarketplaceError> {
        let url = parse_url(&self.config.compose_url(TOKEN_PATH))?;
        let (client_id, client_secret) = self.config.credentials()?;

        let key = self.cache_key();
        if let Some(cached) = self.cache.get(&key).await {
            tracing::trace!(
                target: "walmart_marketplace::auth",
                expires_at = %cached.expires_at(),
                "using cached access token"
            );
            return Ok(cached.value);
        }

        let token = self
            .fetch_new_token(url, client_id, client_secret, options)
            .await?;
        self.cache.put(&key, token.clone(), token.expires_in).await;
        Ok(token)
    }

    async fn fetch_new_token(
        &self,
        url: reqwest::Url,
        client_id: &str,
        client_secret: &str,
        options: &RequestOptions,
    ) -> Result<AccessToken, MarketplaceError> {
        let correlation_id = options.resolve_correlation_id();

        let headers = HttpHeaderBuilder::new()
            .with_basic_auth(client_id, client_secret)?
            .with_correlation_id(&correlation_id)?
            .with_service_name(&self.config.service_name)?
            .with_channel_type(self.config.channel_type.as_deref())?
            .with_accept("application/json")
            .with_form_content_type()
            .with_custom_headers(&options.headers)?
            .build();

        let ctx = HttpRequestContext {
            correlation_id,
            operation: "authentication.get_access_token".to_string(),
            method: reqwest::Method::POST,
            url: url.to_string(),
        };

        let builder = self
            .http
            .post(url)
            .headers(headers.clone())
            .form(&[("grant_type", "client_credentials")]);
        let builder = apply_before_send(&self.interceptors, &ctx, builder, &headers)?;

        tracing::debug!(
            target: "walmart_marketplace::auth",
            url = %ctx.url,
            correlation_id = %ctx.correlation_id,
            "requesting access token"
        );

        let response = builder
            .send()
            .await
            .map_err(|e| classify_send_error(e, &ctx, &self.interceptors))?;

        if !response.status().is_success() {
            return Err(classify_error_response(response, &ctx, &self.interceptors).await);
        }
        for interceptor in &self.interceptors {
            interceptor.on_response(&ctx, &response)?;
        }

        let text = response
            .text()
            .await
            .map_err(|e| classify_send_error(e, &ctx, &self.interceptors))?;
        let token: AccessToken = serde_json::from_str(&text).map_err(|e| {
            MarketplaceError::ParseError(format!("Failed to parse token response: {e}"))
        })?;

        tracing::debug!(
            target: "walmart_marketplace::auth",
            expires_in = token.expires_in,
            "obtained access token"
        );
        Ok(token)
    }
}

#[async_trait::async_trait]
impl TokenProvider for AuthenticationProvider {
    async fn token(&self, options: &RequestOptions) -> Result<AccessToken, MarketplaceError> {
        self.get_access_token(options).await
    }
}
