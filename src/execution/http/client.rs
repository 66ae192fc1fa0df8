//! Transport construction.
//!
//! Turns [`HttpConfig`] into the `reqwest::Client` shared by the token flow
//! and every service. A client passed to the builder skips this entirely.

use super::headers::HttpHeaderBuilder;
use crate::config::HttpConfig;
use crate::error::MarketplaceError;

/// `User-Agent` sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("walmart-marketplace/", env!("CARGO_PKG_VERSION"));

/// Build the shared HTTP client.
///
/// Configured default headers are validated with the same rules as per-call
/// headers; the marketplace headers themselves are added per request.
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client, MarketplaceError> {
    let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
    let default_headers = HttpHeaderBuilder::new()
        .with_custom_headers(&config.headers)?
        .build();

    let mut builder = reqwest::Client::builder()
        .user_agent(user_agent)
        .default_headers(default_headers);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(proxy) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy).map_err(|e| {
            MarketplaceError::ConfigurationError(format!("Invalid proxy URL '{proxy}': {e}"))
        })?;
        builder = builder.proxy(proxy);
    }

    tracing::debug!(
        target: "walmart_marketplace::http",
        user_agent,
        timeout_ms = config.timeout.map(|t| t.as_millis() as u64),
        proxy = config.proxy.is_some(),
        default_headers = config.headers.len(),
        "building http client"
    );

    builder.build().map_err(|e| {
        MarketplaceError::ConfigurationError(format!("Failed to create HTTP client: {e}"))
    })
}
