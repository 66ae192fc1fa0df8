//! HTTP Headers Utility
//!
//! Builds the marketplace's standard request headers.

use crate::error::MarketplaceError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

pub const ACCESS_TOKEN_HEADER: &str = "WM_SEC.ACCESS_TOKEN";
pub const CORRELATION_ID_HEADER: &str = crate::options::CORRELATION_ID_HEADER;
pub const SERVICE_NAME_HEADER: &str = "WM_SVC.NAME";
pub const CHANNEL_TYPE_HEADER: &str = "WM_CONSUMER.CHANNEL.TYPE";

/// HTTP header builder for marketplace requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// `Authorization: Basic base64(client_id:client_secret)`
    pub fn with_basic_auth(
        mut self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<Self, MarketplaceError> {
        let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
        let mut value = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|e| {
            MarketplaceError::ConfigurationError(format!("Invalid client credentials: {e}"))
        })?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    /// `WM_SEC.ACCESS_TOKEN: <token>`
    pub fn with_access_token(mut self, token: &str) -> Result<Self, MarketplaceError> {
        let mut value = HeaderValue::from_str(token).map_err(|e| {
            MarketplaceError::ConfigurationError(format!("Invalid access token format: {e}"))
        })?;
        value.set_sensitive(true);
        self.headers
            .insert(HeaderName::from_static("wm_sec.access_token"), value);
        Ok(self)
    }

    pub fn with_correlation_id(self, correlation_id: &str) -> Result<Self, MarketplaceError> {
        self.with_header(CORRELATION_ID_HEADER, correlation_id)
    }

    pub fn with_service_name(self, service_name: &str) -> Result<Self, MarketplaceError> {
        self.with_header(SERVICE_NAME_HEADER, service_name)
    }

    pub fn with_channel_type(self, channel_type: Option<&str>) -> Result<Self, MarketplaceError> {
        match channel_type {
            Some(channel_type) => self.with_header(CHANNEL_TYPE_HEADER, channel_type),
            None => Ok(self),
        }
    }

    pub fn with_accept(mut self, accept: &'static str) -> Self {
        self.headers.insert(ACCEPT, HeaderValue::from_static(accept));
        self
    }

    pub fn with_json_content_type(self) -> Self {
        self.with_content_type("application/json")
    }

    pub fn with_form_content_type(self) -> Self {
        self.with_content_type("application/x-www-form-urlencoded")
    }

    fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        self
    }

    /// Add a custom header
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self, MarketplaceError> {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            MarketplaceError::ConfigurationError(format!("Invalid header name '{name}': {e}"))
        })?;
        self.headers.insert(
            header_name,
            HeaderValue::from_str(value).map_err(|e| {
                MarketplaceError::ConfigurationError(format!(
                    "Invalid header value for '{name}': {e}"
                ))
            })?,
        );
        Ok(self)
    }

    /// Add multiple custom headers from a HashMap
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, MarketplaceError> {
        for (key, value) in custom_headers {
            self = self.with_header(key, value)?;
        }
        Ok(self)
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a HeaderMap to a HashMap, dropping non UTF-8 values.
pub fn headermap_to_hashmap(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(k, v)| {
            v.to_str()
                .ok()
                .map(|v_str| (k.as_str().to_string(), v_str.to_string()))
        })
        .collect()
}
