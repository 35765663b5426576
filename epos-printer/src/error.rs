//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// HTTP request could not be completed (connect, TLS, I/O)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The device did not answer before the configured timeout
    #[error("Timeout after {0} ms")]
    Timeout(u128),

    /// The device answered with a non-200 status
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// The device reply is not a usable ePOS-Print response document
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Background jobs need a running tokio runtime
    #[error("No async runtime: {0}")]
    NoRuntime(String),

    /// Layout script could not be parsed
    #[error("Invalid layout: {0}")]
    Layout(#[from] serde_json::Error),
}

impl From<quick_xml::Error> for PrintError {
    fn from(e: quick_xml::Error) -> Self {
        PrintError::MalformedResponse(e.to_string())
    }
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
