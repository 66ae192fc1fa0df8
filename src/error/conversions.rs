//! Type Conversions for MarketplaceError
//!
//! From trait implementations for converting common error types into
//! MarketplaceError.

use super::types::MarketplaceError;

impl From<reqwest::Error> for MarketplaceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            if let Some(url) = err.url() {
                return Self::url_parse_error(url.as_str());
            }
        }
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for MarketplaceError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for MarketplaceError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::ConfigurationError(format!("Invalid header value: {err}"))
    }
}

impl From<csv::Error> for MarketplaceError {
    fn from(err: csv::Error) -> Self {
        Self::ParseError(format!("Invalid CSV: {err}"))
    }
}

impl From<zip::result::ZipError> for MarketplaceError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::ParseError(format!("Invalid zip archive: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: MarketplaceError = json_err.into();
        assert!(matches!(err, MarketplaceError::JsonError(_)));
    }

    #[test]
    fn test_from_invalid_header_value() {
        let header_err = reqwest::header::HeaderValue::from_str("bad\nvalue").unwrap_err();
        let err: MarketplaceError = header_err.into();
        assert!(matches!(err, MarketplaceError::ConfigurationError(_)));
    }

    #[test]
    fn test_from_zip_error() {
        let zip_err = zip::ZipArchive::new(std::io::Cursor::new(b"PK\x03\x04 truncated".to_vec()))
            .err()
            .unwrap();
        let err: MarketplaceError = zip_err.into();
        assert!(matches!(err, MarketplaceError::ParseError(ref m) if m.starts_with("Invalid zip archive")));
    }
}
