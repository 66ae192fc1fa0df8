//! Tracing Module - Logging and Debugging Instrumentation
//!
//! The library only emits `tracing` events. Installing a subscriber is the
//! application's choice; [`init_tracing`] is a convenience for binaries and
//! tests that want the crate's defaults.

use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::EnvFilter;

/// Output format for [`init_tracing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Subscriber configuration.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive, e.g. `walmart_marketplace=debug`. `RUST_LOG` wins when set.
    pub filter: String,
    pub format: OutputFormat,
    /// Mask tokens and credentials in logged headers.
    pub mask_sensitive_values: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: "walmart_marketplace=info".to_string(),
            format: OutputFormat::default(),
            mask_sensitive_values: true,
        }
    }
}

impl TracingConfig {
    /// Debug-level output for this crate.
    pub fn debug() -> Self {
        Self {
            filter: "walmart_marketplace=debug".to_string(),
            format: OutputFormat::Pretty,
            ..Default::default()
        }
    }

    /// JSON lines, info level.
    pub fn json() -> Self {
        Self {
            format: OutputFormat::Json,
            ..Default::default()
        }
    }
}

/// Install a global `tracing-subscriber` fmt subscriber.
///
/// Returns an error string when a global subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> Result<(), String> {
    set_mask_sensitive_values(config.mask_sensitive_values);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| e.to_string())?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match config.format {
        OutputFormat::Compact => builder.compact().try_init(),
        OutputFormat::Pretty => builder.pretty().try_init(),
        OutputFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| e.to_string())
}

static MASK_SENSITIVE_VALUES: AtomicBool = AtomicBool::new(true);

pub fn set_mask_sensitive_values(mask: bool) {
    MASK_SENSITIVE_VALUES.store(mask, Ordering::Relaxed);
}

pub fn get_mask_sensitive_values() -> bool {
    MASK_SENSITIVE_VALUES.load(Ordering::Relaxed)
}

/// Shorten a secret to its first and last few characters.
pub fn mask_sensitive_value(value: &str) -> String {
    if !get_mask_sensitive_values() {
        return value.to_string();
    }
    if let Some(credentials) = value.strip_prefix("Basic ") {
        return format!("Basic {}", mask_sensitive_value(credentials));
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}

fn is_sensitive_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.contains("authorization") || name.contains("token") || name.contains("secret")
}

/// Headers as a JSON object string with secrets masked.
pub fn format_headers_for_logging(headers: &reqwest::header::HeaderMap) -> String {
    let map: std::collections::BTreeMap<&str, String> = headers
        .iter()
        .map(|(k, v)| {
            let value = v.to_str().unwrap_or("<invalid>");
            let shown = if v.is_sensitive() || is_sensitive_header(k.as_str()) {
                mask_sensitive_value(value)
            } else {
                value.to_string()
            };
            (k.as_str(), shown)
        })
        .collect();
    serde_json::to_string(&map).unwrap_or_else(|_| format!("{map:?}"))
}
