//! Error types shared by the config, sheets and repository layers

use thiserror::Error;

/// Result type for roster operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the backing spreadsheet
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the Sheets API
    #[error("Sheets API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Credential or token problem
    #[error("authentication error: {0}")]
    Auth(String),

    /// Signing the service-account assertion failed
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No row with the requested identifier
    #[error("{what} with id {id} not found")]
    NotFound { what: &'static str, id: String },
}
