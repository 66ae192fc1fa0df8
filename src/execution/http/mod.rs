//! HTTP Utilities
//!
//! - HTTP client construction
//! - Header management
//! - HTTP interceptors
//! - Response classification

pub mod client;
pub mod headers;
pub mod interceptor;
pub mod response;

pub use client::*;
pub use headers::*;
pub use interceptor::*;
pub use response::*;
