//! HTTP Interceptor interfaces
//!
//! Interceptors observe and tweak request builders before send, observe
//! successful responses, and are notified of errors. Hooks run inline on the
//! calling task and should stay cheap.

use crate::error::MarketplaceError;
use crate::observability::tracing::format_headers_for_logging;
use reqwest::header::HeaderMap;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    /// The `WM_QOS.CORRELATION_ID` sent with the request.
    pub correlation_id: String,
    /// Logical operation name, e.g. `items.get_an_item`.
    pub operation: String,
    pub method: reqwest::Method,
    pub url: String,
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before sending a request. Return the (possibly modified) builder
    /// or an error to short-circuit the request.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        _headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, MarketplaceError> {
        Ok(builder)
    }

    /// Called after a successful response is received.
    fn on_response(
        &self,
        _ctx: &HttpRequestContext,
        _response: &reqwest::Response,
    ) -> Result<(), MarketplaceError> {
        Ok(())
    }

    /// Called when sending fails or the response is classified as an error.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &MarketplaceError) {}
}

/// A logging interceptor backed by `tracing`. Secrets are masked.
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        builder: reqwest::RequestBuilder,
        headers: &HeaderMap,
    ) -> Result<reqwest::RequestBuilder, MarketplaceError> {
        tracing::debug!(
            target: "walmart_marketplace::http",
            operation = %ctx.operation,
            method = %ctx.method,
            url = %ctx.url,
            correlation_id = %ctx.correlation_id,
            headers = %format_headers_for_logging(headers),
            "sending request"
        );
        Ok(builder)
    }

    fn on_response(
        &self,
        ctx: &HttpRequestContext,
        response: &reqwest::Response,
    ) -> Result<(), MarketplaceError> {
        tracing::debug!(
            target: "walmart_marketplace::http",
            operation = %ctx.operation,
            url = %ctx.url,
            correlation_id = %ctx.correlation_id,
            status = response.status().as_u16(),
            "response received"
        );
        Ok(())
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &MarketplaceError) {
        tracing::debug!(
            target: "walmart_marketplace::http",
            operation = %ctx.operation,
            url = %ctx.url,
            correlation_id = %ctx.correlation_id,
            err = %error,
            "request error"
        );
    }
}

/// Run `on_before_send` for every interceptor in order.
pub(crate) fn apply_before_send(
    interceptors: &[std::sync::Arc<dyn HttpInterceptor>],
    ctx: &HttpRequestContext,
    mut builder: reqwest::RequestBuilder,
    headers: &HeaderMap,
) -> Result<reqwest::RequestBuilder, MarketplaceError> {
    for interceptor in interceptors {
        builder = interceptor.on_before_send(ctx, builder, headers)?;
    }
    Ok(builder)
}

pub(crate) fn notify_error(
    interceptors: &[std::sync::Arc<dyn HttpInterceptor>],
    ctx: &HttpRequestContext,
    error: &MarketplaceError,
) {
    for interceptor in interceptors {
        interceptor.on_error(ctx, error);
    }
}
