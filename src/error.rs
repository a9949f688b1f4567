//! Error types for RankVectors API operations.

use thiserror::Error;

/// Errors that can occur during RankVectors API operations.
#[derive(Debug, Error)]
pub enum RankVectorsError {
    /// Client configuration is missing or invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The API answered with a non-2xx status.
    ///
    /// The message is the server's `error` field when the body carried one,
    /// otherwise a synthesized `HTTP <code> <reason>` string.
    #[error("{message}")]
    RequestFailed {
        message: String,
        status_code: Option<u16>,
    },

    /// Input that cannot be turned into a request.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON encoding or decoding error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RankVectorsError {
    /// HTTP status code of a failed request, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status_code, .. } => *status_code,
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}

/// Result type alias for RankVectors operations.
pub type Result<T> = core::result::Result<T, RankVectorsError>;
