//! Request Execution Layer
//!
//! One place that turns an endpoint description into exactly one
//! authenticated HTTP request:
//! - token lookup through the configured [`TokenProvider`]
//! - URL composition and query merging
//! - the marketplace's standard headers plus per-call headers
//! - interceptor hooks and error classification
//!
//! There is no retry here. A failed request surfaces its error unchanged.

use crate::auth::TokenProvider;
use crate::config::MarketplaceConfig;
use crate::error::MarketplaceError;
use crate::execution::http::headers::{HttpHeaderBuilder, headermap_to_hashmap};
use crate::execution::http::interceptor::{HttpInterceptor, HttpRequestContext, apply_before_send};
use crate::execution::http::response::{classify_error_response, classify_send_error};
use crate::options::RequestOptions;
use crate::utils::url::{append_query, append_raw_query, parse_url};
use reqwest::Method;
use std::collections::HashMap;
use std::sync::Arc;

/// A file sent as one multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct MultipartFile {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MultipartFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            field_name: "file".to_string(),
            file_name: file_name.into(),
            content_type: "application/octet-stream".to_string(),
            bytes: bytes.into(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = field_name.into();
        self
    }

    fn into_form(self) -> Result<reqwest::multipart::Form, MarketplaceError> {
        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)
            .map_err(|e| {
                MarketplaceError::InvalidParameter(format!("Invalid file content type: {e}"))
            })?;
        Ok(reqwest::multipart::Form::new().part(self.field_name, part))
    }
}

/// HTTP request body type
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HttpBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartFile),
}

/// Description of a single endpoint call.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    /// Logical operation name used in logs and interceptor context.
    pub operation: &'static str,
    pub method: Method,
    /// Path appended verbatim to the base URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// Complete query string (e.g. an orders `nextCursor`), merged before `query`.
    pub raw_query: Option<String>,
    pub body: HttpBody,
    pub accept: &'static str,
    /// Statuses treated as success. `None` means any 2xx.
    pub accepted_statuses: Option<Vec<u16>>,
}

impl RequestSpec {
    pub fn new(operation: &'static str, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            query: Vec::new(),
            raw_query: None,
            body: HttpBody::Empty,
            accept: "application/json",
            accepted_statuses: None,
        }
    }

    pub fn get(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::GET, path)
    }

    pub fn post(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::POST, path)
    }

    pub fn put(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::PUT, path)
    }

    pub fn delete(operation: &'static str, path: impl Into<String>) -> Self {
        Self::new(operation, Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn raw_query(mut self, raw: impl Into<String>) -> Self {
        self.raw_query = Some(raw.into());
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = HttpBody::Json(body);
        self
    }

    pub fn multipart(mut self, file: MultipartFile) -> Self {
        self.body = HttpBody::Multipart(file);
        self
    }

    pub fn accept(mut self, accept: &'static str) -> Self {
        self.accept = accept;
        self
    }

    pub fn accepted_statuses(mut self, statuses: impl Into<Vec<u16>>) -> Self {
        self.accepted_statuses = Some(statuses.into());
        self
    }

    fn is_accepted(&self, status: reqwest::StatusCode) -> bool {
        match &self.accepted_statuses {
            Some(statuses) => statuses.contains(&status.as_u16()),
            None => status.is_success(),
        }
    }
}

/// Result of HTTP request execution
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// Body as JSON. An empty body is `null`.
    pub fn json(&self) -> Result<serde_json::Value, MarketplaceError> {
        if self.body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&self.body).map_err(|e| {
            MarketplaceError::ParseError(format!("Response body is not valid JSON: {e}"))
        })
    }
}

/// Executes marketplace requests.
#[derive(Clone)]
pub struct RequestExecutor {
    config: Arc<MarketplaceConfig>,
    http: reqwest::Client,
    tokens: Arc<dyn TokenProvider>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl RequestExecutor {
    pub fn new(
        config: Arc<MarketplaceConfig>,
        http: reqwest::Client,
        tokens: Arc<dyn TokenProvider>,
        interceptors: Vec<Arc<dyn HttpInterceptor>>,
    ) -> Self {
        Self {
            config,
            http,
            tokens,
            interceptors,
        }
    }

    pub fn config(&self) -> &MarketplaceConfig {
        &self.config
    }

    /// Send one request and return the raw response on success.
    pub async fn execute(
        &self,
        spec: RequestSpec,
        options: &RequestOptions,
    ) -> Result<ApiResponse, MarketplaceError> {
        let (response, ctx) = self.send(spec, options).await?;
        let status = response.status().as_u16();
        let headers = headermap_to_hashmap(response.headers());
        let body = response
            .text()
            .await
            .map_err(|e| classify_send_error(e, &ctx, &self.interceptors))?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// Send one request and parse the body as JSON.
    pub async fn execute_json(
        &self,
        spec: RequestSpec,
        options: &RequestOptions,
    ) -> Result<serde_json::Value, MarketplaceError> {
        self.execute(spec, options).await?.json()
    }

    /// Send one request and return the body bytes untouched.
    pub async fn execute_bytes(
        &self,
        spec: RequestSpec,
        options: &RequestOptions,
    ) -> Result<Vec<u8>, MarketplaceError> {
        let (response, ctx) = self.send(spec, options).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_send_error(e, &ctx, &self.interceptors))?;
        Ok(bytes.to_vec())
    }

    async fn send(
        &self,
        spec: RequestSpec,
        options: &RequestOptions,
    ) -> Result<(reqwest::Response, HttpRequestContext), MarketplaceError> {
        let token = self.tokens.token(options).await?;

        let mut url = parse_url(&self.config.compose_url(&spec.path))?;
        if let Some(raw) = &spec.raw_query {
            append_raw_query(&mut url, raw);
        }
        append_query(
            &mut url,
            spec.query.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        append_query(&mut url, options.query_pairs());

        let correlation_id = options.resolve_correlation_id();
        let mut headers = HttpHeaderBuilder::new()
            .with_access_token(&token.access_token)?
            .with_correlation_id(&correlation_id)?
            .with_service_name(&self.config.service_name)?
            .with_channel_type(self.config.channel_type.as_deref())?
            .with_accept(spec.accept);
        // A custom token provider may run without client credentials.
        if let Ok((client_id, client_secret)) = self.config.credentials() {
            headers = headers.with_basic_auth(client_id, client_secret)?;
        }
        if matches!(spec.body, HttpBody::Json(_)) {
            headers = headers.with_json_content_type();
        }
        let headers = headers.with_custom_headers(&options.headers)?.build();

        let ctx = HttpRequestContext {
            correlation_id,
            operation: spec.operation.to_string(),
            method: spec.method.clone(),
            url: url.to_string(),
        };

        let builder = self
            .http
            .request(spec.method.clone(), url)
            .headers(headers.clone());
        let builder = match spec.body.clone() {
            HttpBody::Empty => builder,
            HttpBody::Json(body) => builder.json(&body),
            HttpBody::Multipart(file) => builder.multipart(file.into_form()?),
        };
        let builder = apply_before_send(&self.interceptors, &ctx, builder, &headers)?;

        let response = builder
            .send()
            .await
            .map_err(|e| classify_send_error(e, &ctx, &self.interceptors))?;

        if !spec.is_accepted(response.status()) {
            return Err(classify_error_response(response, &ctx, &self.interceptors).await);
        }
        for interceptor in &self.interceptors {
            interceptor.on_response(&ctx, &response)?;
        }
        Ok((response, ctx))
    }
}
