//! URL helpers.
//!
//! Base URLs are joined by plain concatenation so that an unusable base URL
//! surfaces verbatim in the resulting parse error.

use crate::error::MarketplaceError;

/// Parse an absolute URL, mapping failures to `Failed to parse URL from <url>`.
pub fn parse_url(url: &str) -> Result<reqwest::Url, MarketplaceError> {
    reqwest::Url::parse(url).map_err(|_| MarketplaceError::url_parse_error(url))
}

/// Percent-encode a single path segment (SKU, item id, purchase order id).
pub fn encode_path_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

/// Append query pairs to a URL, percent-encoding keys and values.
pub fn append_query<'a, I>(url: &mut reqwest::Url, pairs: I)
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs = pairs.into_iter().peekable();
    if pairs.peek().is_none() {
        return;
    }
    let mut serializer = url.query_pairs_mut();
    for (k, v) in pairs {
        serializer.append_pair(k, v);
    }
}

/// Merge a raw query string (`a=1&b=2`, optionally prefixed with `?`) into a URL.
pub fn append_raw_query(url: &mut reqwest::Url, raw: &str) {
    let raw = raw.trim_start_matches('?');
    if raw.is_empty() {
        return;
    }
    let merged = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{raw}"),
        _ => raw.to_string(),
    };
    url.set_query(Some(&merged));
}
