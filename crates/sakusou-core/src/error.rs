//! Error types for the core helpers

use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the core helpers
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown key-case name
    #[error("Unknown key case '{0}'. Expected 'camel' or 'snake'")]
    UnknownKeyCase(String),

    /// Filesystem I/O error, tagged with the path being accessed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// Path that was being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML encode/decode error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CoreError {
    /// Create a new `Io` error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
