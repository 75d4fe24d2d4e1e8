//! Error types for the catalog adapters.

use thiserror::Error;

/// Errors that can occur when talking to a third-party upstream.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("Upstream {url} returned {status}")]
    Upstream { url: String, status: u16 },

    /// Upstream answered with an HTML page instead of JSON
    #[error("Upstream {0} returned HTML instead of JSON")]
    NotJson(String),

    /// Body could not be parsed or had no recognizable shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Nothing matched in any upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller input rejected before any request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CatalogError {
    /// Whether the failure happened below HTTP (no response at all)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }
}

impl From<CatalogError> for kudo_core::KudoError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(what) => kudo_core::KudoError::not_found("song", what),
            CatalogError::InvalidInput(msg) => kudo_core::KudoError::invalid_input(msg),
            other => kudo_core::KudoError::network(other.to_string()),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
