//! Zip payloads returned by report endpoints.

use crate::error::MarketplaceError;
use std::io::{Cursor, Read};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Whether `data` starts with a zip local file header.
pub fn is_zip(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Contents of the first `.csv` entry of a zip archive.
pub fn first_csv_entry(data: &[u8]) -> Result<Vec<u8>, MarketplaceError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();
        if !entry.is_file() || !name.to_ascii_lowercase().ends_with(".csv") {
            continue;
        }
        tracing::debug!(
            target: "walmart_marketplace::http",
            entry = %name,
            size = entry.size(),
            "extracting report entry"
        );
        let mut contents = Vec::new();
        entry.read_to_end(&mut contents).map_err(|e| {
            MarketplaceError::ParseError(format!("Failed to read {name}: {e}"))
        })?;
        return Ok(contents);
    }
    Err(MarketplaceError::ParseError(
        "zip archive holds no CSV entry".to_string(),
    ))
}
