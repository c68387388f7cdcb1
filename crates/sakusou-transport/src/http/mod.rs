//! HTTP transport implementation
//!
//! Provides the reqwest-backed client that implements the Transport trait.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
