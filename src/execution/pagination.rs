//! Cursor pagination for list endpoints.
//!
//! Without `auto_pagination` one page is fetched and its item array returned.
//! With it, continuation cursors are followed and the item arrays
//! concatenated until the cursor is absent, empty or repeats, or until
//! `max_pages` pages were fetched. Any page failure aborts the walk.

use super::executor::{RequestExecutor, RequestSpec};
use crate::error::MarketplaceError;
use crate::options::RequestOptions;
use serde_json::Value;

/// Where a list endpoint keeps its items and its continuation cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// JSON pointer to the item array.
    pub items_pointer: &'static str,
    /// JSON pointer to the next-page cursor.
    pub cursor_pointer: &'static str,
    /// Query parameter the cursor is sent as.
    pub cursor_param: &'static str,
    /// Cursor sent with the first page, if the endpoint wants one.
    pub initial_cursor: Option<&'static str>,
}

impl PageSpec {
    /// Items of one page. A missing array is an empty page.
    pub fn items(&self, page: &Value) -> Result<Vec<Value>, MarketplaceError> {
        match page.pointer(self.items_pointer) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => Ok(items.clone()),
            // Single-element lists are sometimes returned as a bare object.
            Some(item @ Value::Object(_)) => Ok(vec![item.clone()]),
            Some(other) => Err(MarketplaceError::ParseError(format!(
                "Expected an array at {}, found {other}",
                self.items_pointer
            ))),
        }
    }

    /// Continuation cursor of one page, if any.
    pub fn next_cursor(&self, page: &Value) -> Option<String> {
        match page.pointer(self.cursor_pointer)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

enum Cursor {
    Param(String),
    QueryString(String),
}

impl Cursor {
    fn parse(cursor: &str) -> Self {
        if cursor.starts_with('?') {
            Cursor::QueryString(cursor.to_string())
        } else {
            Cursor::Param(cursor.to_string())
        }
    }
}

fn page_request(
    base: &RequestSpec,
    page: &PageSpec,
    cursor: Option<&Cursor>,
    options: &RequestOptions,
) -> (RequestSpec, RequestOptions) {
    let mut spec = base.clone();
    let mut options = options.clone();
    match cursor {
        // A full query string carries every parameter of the next page.
        Some(Cursor::QueryString(raw)) => {
            spec.query.clear();
            options.query.clear();
            spec.raw_query = Some(raw.clone());
        }
        Some(Cursor::Param(value)) => {
            spec = spec.query(page.cursor_param, value.clone());
            if let Some(limit) = options.limit {
                spec = spec.query("limit", limit.to_string());
            }
        }
        None => {
            if let Some(limit) = options.limit {
                spec = spec.query("limit", limit.to_string());
            }
        }
    }
    (spec, options)
}

/// Fetch one page, or every page when `options.auto_pagination` is set.
pub async fn fetch_pages(
    executor: &RequestExecutor,
    base: RequestSpec,
    page: &PageSpec,
    options: &RequestOptions,
) -> Result<Vec<Value>, MarketplaceError> {
    let mut cursor = page.initial_cursor.map(Cursor::parse);
    let mut items = Vec::new();
    let mut pages = 0usize;
    let mut last_cursor: Option<String> = None;

    loop {
        let (spec, page_options) = page_request(&base, page, cursor.as_ref(), options);
        let body = executor.execute_json(spec, &page_options).await?;
        items.extend(page.items(&body)?);
        pages += 1;

        if !options.auto_pagination {
            break;
        }
        if options.max_pages.is_some_and(|max| pages >= max) {
            break;
        }
        let Some(next) = page.next_cursor(&body) else {
            break;
        };
        if last_cursor.as_deref() == Some(next.as_str()) {
            break;
        }

        tracing::debug!(
            target: "walmart_marketplace::http",
            operation = base.operation,
            pages = pages,
            items = items.len(),
            "following next cursor"
        );
        cursor = Some(Cursor::parse(&next));
        last_cursor = Some(next);
    }

    Ok(items)
}
