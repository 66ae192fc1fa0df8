//! Error type definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MarketplaceError>;

/// The raw response details attached to every API error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorCause {
    /// HTTP status code returned by the marketplace.
    pub status: u16,
    /// Reason phrase from the status line, as sent by the server.
    pub status_text: String,
    /// Response body. JSON when the body parsed as JSON, otherwise a JSON string.
    pub body: serde_json::Value,
}

/// Errors produced by the marketplace client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketplaceError {
    /// Missing credentials, invalid header values, client construction failures.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A composed request URL could not be parsed.
    #[error("Failed to parse URL from {url}")]
    UrlParseError { url: String },

    /// Transport-level failure (DNS, connect, TLS, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The marketplace answered with a non-success status.
    #[error("{message}")]
    ApiError {
        message: String,
        cause: ApiErrorCause,
    },

    /// A successful response did not have the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// JSON (de)serialization failure.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// A caller-supplied argument cannot be used to build the request.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Coarse error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Authentication,
    RateLimit,
    Client,
    Server,
    Parsing,
    Validation,
}

impl MarketplaceError {
    /// Build an API error. The message is always `"<status> <status_text>"`.
    pub fn api_error(
        status: u16,
        status_text: impl Into<String>,
        body: serde_json::Value,
    ) -> Self {
        let status_text = status_text.into();
        Self::ApiError {
            message: format!("{status} {status_text}"),
            cause: ApiErrorCause {
                status,
                status_text,
                body,
            },
        }
    }

    pub fn url_parse_error(url: impl Into<String>) -> Self {
        Self::UrlParseError { url: url.into() }
    }

    /// HTTP status code, for API errors.
    pub fn status_code(&self) -> Option<u16> {
        self.api_cause().map(|cause| cause.status)
    }

    /// Raw response details, for API errors.
    pub fn api_cause(&self) -> Option<&ApiErrorCause> {
        match self {
            Self::ApiError { cause, .. } => Some(cause),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) | Self::UrlParseError { .. } => {
                ErrorCategory::Configuration
            }
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ApiError { cause, .. } => match cause.status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Client,
            },
            Self::ParseError(_) | Self::JsonError(_) => ErrorCategory::Parsing,
            Self::InvalidParameter(_) => ErrorCategory::Validation,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }

    /// True when the failure was detected before any network access.
    pub fn is_configuration_error(&self) -> bool {
        self.category() == ErrorCategory::Configuration
    }
}
