//! Centralized observability utilities for structured logging
//!
//! Every dispatched request is logged through this layer so that a failing
//! test run can be replayed from its log alone.

use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// HTTP request metadata for structured logging
#[derive(Debug, Clone)]
pub struct RequestMetadata {
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request body size in bytes (optional)
    pub body_size: Option<usize>,
}

impl RequestMetadata {
    /// Create new request metadata
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body_size: None,
        }
    }

    /// Set the request body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log request being sent, along with its curl reproduction
    pub fn log_request(&self, curl: &str) {
        debug!(
            method = %self.method,
            url = %self.url,
            body_size = self.body_size,
            curl = %curl,
            "Sending HTTP request"
        );
    }
}

/// HTTP response metadata for structured logging
#[derive(Debug, Clone)]
pub struct ResponseMetadata {
    /// HTTP status code
    pub status: u16,
    /// Response body size in bytes (optional)
    pub body_size: Option<usize>,
    /// Time elapsed for the request
    pub elapsed: Duration,
}

impl ResponseMetadata {
    /// Create new response metadata
    pub fn new(status: u16, elapsed: Duration) -> Self {
        Self {
            status,
            body_size: None,
            elapsed,
        }
    }

    /// Set the response body size
    pub fn with_body_size(mut self, size: usize) -> Self {
        self.body_size = Some(size);
        self
    }

    /// Log a completed exchange; error statuses are logged at `warn`
    pub fn log_completion(&self, request: &RequestMetadata) {
        if self.status >= 400 {
            warn!(
                method = %request.method,
                url = %request.url,
                status = self.status,
                elapsed_ms = self.elapsed.as_millis(),
                body_size = self.body_size,
                "HTTP request returned an error status"
            );
        } else {
            info!(
                method = %request.method,
                url = %request.url,
                status = self.status,
                elapsed_ms = self.elapsed.as_millis(),
                body_size = self.body_size,
                "HTTP request completed"
            );
        }
    }
}

/// Log an exchange that failed below HTTP (connection, timeout)
pub fn log_transport_failure(request: &RequestMetadata, elapsed: Duration, error: &str) {
    warn!(
        method = %request.method,
        url = %request.url,
        elapsed_ms = elapsed.as_millis(),
        error = %error,
        "HTTP request failed"
    );
}

/// Timer for measuring request duration
pub struct RequestTimer {
    start: Instant,
}

impl RequestTimer {
    /// Start a new timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Install a formatted `tracing` subscriber filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset. Calling this more than once
/// is harmless; later calls leave the first subscriber in place.
#[cfg(feature = "trace")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
