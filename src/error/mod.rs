//! Error Handling Module
//!
//! One error taxonomy for every call this crate makes:
//! - Core error type (`MarketplaceError`) and its API cause (`ApiErrorCause`)
//! - Coarse categories (`ErrorCategory`) for callers that branch on failure kind
//! - Conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use walmart_marketplace::error::{ErrorCategory, MarketplaceError};
//!
//! let error = MarketplaceError::api_error(404, "Not Found", serde_json::Value::Null);
//! assert_eq!(error.to_string(), "404 Not Found");
//! assert_eq!(error.category(), ErrorCategory::Client);
//! ```

mod conversions;
pub mod types;

pub use types::*;
