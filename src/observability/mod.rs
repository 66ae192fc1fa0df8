//! Observability: tracing helpers and subscriber setup.

pub mod tracing;

pub use self::tracing::{OutputFormat, TracingConfig, init_tracing};
