//! Error types for backend exchanges.

use thiserror::Error;

/// The two failure classes an operation can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request never completed, or completed with a non-success status.
    Fetch,
    /// The response body was not the JSON we expected.
    Parse,
}

/// A failed exchange with the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not parse response from {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BackendError {
    /// Collapses the variant into the failure class shown to the operator.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BackendError::Transport { .. } | BackendError::Status { .. } => ErrorKind::Fetch,
            BackendError::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// The URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            BackendError::Transport { url, .. }
            | BackendError::Status { url, .. }
            | BackendError::Parse { url, .. } => url,
        }
    }
}
