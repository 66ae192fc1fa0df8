//! Utility modules
//!
//! Small helpers shared by the auth flow and the endpoint services.

pub mod archive;
pub mod csv;
pub mod url;

pub use url::*;
