//! CMS endpoint error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the CMS endpoint.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No usable response: connection failure, TLS error or HTTP error status.
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with `status != "success"`.
    #[error("Server rejected the request: {message}")]
    Server { message: String },

    /// The body was not JSON or lacked an expected object.
    #[error("Server returned invalid data: {0}")]
    InvalidResponse(String),

    /// A local file to upload could not be read.
    #[error("Cannot read local image '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Records could not be serialized for a save request.
    #[error("Failed to encode request data: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl ApiError {
    /// Whether the failure happened before any server verdict was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;
