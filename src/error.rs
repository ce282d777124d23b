//! Error types

use thiserror::Error;

/// Lookup and consistency failures in the city catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("no weather data for '{0}'")]
    MissingRecord(String),

    #[error("city listed twice: {0}")]
    DuplicateCity(String),
}

/// Icon-font stylesheet fetch failures
#[derive(Debug, Error)]
pub enum IconFontError {
    #[error("icon font request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("icon font request returned HTTP {0}")]
    Status(u16),
}
