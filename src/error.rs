//! Error types for the designer

use thiserror::Error;

/// Result type alias for designer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while editing, rendering, exporting or talking to the API
#[derive(Error, Debug)]
pub enum Error {
    /// Form input rejected before any network call
    #[error("{0}")]
    Validation(String),

    /// Transport-level failure (connection refused, DNS, broken body)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a body we could not understand
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Template id not present in the active mode's template list
    #[error("Unknown template {id} for mode {mode}")]
    UnknownTemplate { id: u32, mode: String },

    /// Failed to allocate or paint the drawing surface
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Failed to encode or write an exported image
    #[error("Export failed: {0}")]
    Export(String),

    /// Client-side key/value storage could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Another submit of the same form is still in flight
    #[error("A request is already in progress")]
    Busy,

    /// The background API worker is gone
    #[error("Worker error: {0}")]
    Worker(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}
