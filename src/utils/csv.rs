//! CSV report rows.
//!
//! Each data row becomes a JSON object keyed by the header row. Blank lines
//! are skipped, missing trailing fields become empty strings and extra
//! fields are dropped.

use crate::error::MarketplaceError;
use serde_json::{Map, Value};

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Parse CSV bytes into row objects keyed by the trimmed header names.
pub fn parse_rows(data: &[u8]) -> Result<Vec<Map<String, Value>>, MarketplaceError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::Headers)
        .from_reader(data);

    let header = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let value = record.get(i).unwrap_or_default();
                (name.to_string(), Value::String(value.to_string()))
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}
