//! Per-call request options.
//!
//! Every operation accepts `&RequestOptions`. Recognized settings are the
//! correlation id override, extra query parameters and headers, and the
//! pagination controls used by list endpoints.

use std::collections::{BTreeMap, HashMap};

/// Header carrying the correlation id.
pub const CORRELATION_ID_HEADER: &str = "WM_QOS.CORRELATION_ID";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Overrides the generated `WM_QOS.CORRELATION_ID`.
    pub correlation_id: Option<String>,
    /// Extra query parameters (e.g. `shipNode`, `productIdType`).
    pub query: BTreeMap<String, String>,
    /// Extra headers; applied after the standard headers.
    pub headers: HashMap<String, String>,
    /// Follow continuation cursors on list endpoints.
    pub auto_pagination: bool,
    /// Page size sent as `limit` on list endpoints.
    pub limit: Option<u32>,
    /// Page-count ceiling when auto-paginating.
    pub max_pages: Option<usize>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Sets a header. `WM_QOS.CORRELATION_ID` is routed to `correlation_id`.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        if name.eq_ignore_ascii_case(CORRELATION_ID_HEADER) {
            self.correlation_id = Some(value.into());
        } else {
            self.headers.insert(name, value.into());
        }
        self
    }

    pub fn auto_pagination(mut self, enabled: bool) -> Self {
        self.auto_pagination = enabled;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Correlation id for this call: the override, or a fresh UUID v4.
    pub fn resolve_correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }

    /// Query parameters in a stable order.
    pub fn query_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.query.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
