//! Error types for the sakusou toolkit
//!
//! Following the `thiserror` idiom, every failure a test can hit while
//! preparing or dispatching a request, mapping an entity, or writing a
//! fixture file surfaces as one [`Error`] variant.

use sakusou_core::CoreError;
use sakusou_transport::TransportError;
use thiserror::Error;

/// Result type alias for sakusou operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the sakusou toolkit.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP exchange itself failed (connection, timeout, protocol).
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Core helper failure (file I/O, JSON/YAML, key case).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Invalid URL assembled from client parts.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid HTTP header name.
    #[error("Invalid HTTP header name: {0}")]
    InvalidHeaderName(String),

    /// Invalid HTTP header value.
    #[error("Invalid HTTP header value: {0}")]
    InvalidHeaderValue(String),

    /// A response mapping could not be turned into an entity, or back.
    #[error("Entity mapping error: {0}")]
    Entity(String),

    /// Image or video fixture encoding failed.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors not covered by specific variants.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a new `Entity` error
    pub fn entity(msg: impl Into<String>) -> Self {
        Self::Entity(msg.into())
    }

    /// Create a new `Config` error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether the error came from the HTTP transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
