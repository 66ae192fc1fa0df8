//! # walmart-marketplace - Async client for the Walmart Marketplace API
//!
//! Authenticated access to the inventory, item, order, price and report
//! endpoints of the Walmart Marketplace seller API.
//!
//! ## Features
//!
//! - **Token caching**: access tokens are cached per base URL in a process-wide
//!   cache (or one you inject) and reused until they expire.
//! - **Uniform errors**: every non-success response becomes
//!   [`MarketplaceError::ApiError`] with message `"<status> <reason>"` and the raw
//!   body attached.
//! - **Await or callback**: every operation is an `async fn`; [`CallbackExt`]
//!   delivers the same outcome to an `(error, value)` callback.
//! - **Pagination**: list endpoints return one page, or every page with
//!   `RequestOptions::auto_pagination(true)`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use walmart_marketplace::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = WalmartMarketplace::builder()
//!         .client_id("your-client-id")
//!         .client_secret("your-client-secret")
//!         .sandbox()
//!         .build()?;
//!
//!     let items = client
//!         .items()
//!         .get_all_items(&RequestOptions::new().limit(20).auto_pagination(true))
//!         .await?;
//!     println!("{} items", items.len());
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

pub mod auth;
pub mod builder;
pub mod callback;
pub mod client;
pub mod config;
pub mod error;
pub mod execution;
pub mod observability;
pub mod options;
pub mod services;
pub mod utils;

pub use auth::{
    AccessToken, AuthenticationProvider, CachedAccessToken, InMemoryTokenCache,
    StaticTokenProvider, TokenCache, TokenCacheKey, TokenProvider,
};
pub use builder::MarketplaceBuilder;
pub use callback::{CallbackExt, Completion};
pub use client::WalmartMarketplace;
pub use config::{DEFAULT_BASE_URL, HttpConfig, MarketplaceConfig, SANDBOX_BASE_URL};
pub use error::{ApiErrorCause, ErrorCategory, MarketplaceError, Result};
pub use execution::{ApiResponse, MultipartFile};
pub use options::RequestOptions;

/// Common imports.
pub mod prelude {
    pub use crate::callback::{CallbackExt, Completion};
    pub use crate::client::WalmartMarketplace;
    pub use crate::config::MarketplaceConfig;
    pub use crate::error::{MarketplaceError, Result};
    pub use crate::execution::MultipartFile;
    pub use crate::options::RequestOptions;
}
