//! Execution layer: HTTP plumbing, request execution and pagination.

pub mod executor;
pub mod http;
pub mod pagination;

pub use executor::{ApiResponse, HttpBody, MultipartFile, RequestExecutor, RequestSpec};
pub use pagination::{PageSpec, fetch_pages};
