//! Error taxonomy for a harvest run.
//!
//! Every variant is fatal: nothing is retried, skipped or logged-and-continued.
//! Callers propagate with `?` up to the command handler.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// Missing credentials or an unusable configuration value.
    /// Raised before any network call is attempted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// A live call was made but its response could not be written to the cache.
    #[error("Failed to persist cached response for {signature}: {message}")]
    CachePersist { signature: String, message: String },

    #[error("Malformed response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("Unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HarvestError {
    pub fn transport(url: &str, err: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.to_string(),
            message: err.to_string(),
        }
    }

    pub fn malformed(url: &str, msg: impl Into<String>) -> Self {
        Self::MalformedResponse {
            url: url.to_string(),
            message: msg.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
