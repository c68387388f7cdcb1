//! # sakusou
//!
//! Test-support toolkit for hand-written HTTP API suites:
//! - API client plumbing: URL and header preparation, camelCase/snake_case
//!   body re-keying, dispatch with a reproducible `curl` line per request
//! - Typed entities over flat response mappings
//! - Assertion helpers over responses
//! - Random strings and fixture files (binary, ASCII, noise images and videos)
//! - JSON/YAML fixture I/O
//! - `--app` / `--api` test-category gates
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sakusou::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> sakusou::Result<()> {
//!     let core = ClientCore::new("api.example.com")?;
//!     let url = core.prepare_request_url("/v1/users/7", None, None, None)?;
//!     let headers = core.prepare_request_headers([("x-api-key", "secret")])?;
//!
//!     let (request, response) = core
//!         .dispatch_request(&url, Method::Get, headers, None, None)
//!         .await?;
//!
//!     println!("{}", request.curl());
//!     Examine::validate_status(&response, 200);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{ApiClient, ClientCore, Method, Request, Response, empty_body};
pub use config::ClientConfig;
pub use entity::Entity;
pub use error::{Error, Result};
pub use examine::{Examine, JsonType};
pub use harness::{Category, HarnessOptions, Suite};
pub use sakusou_core::{KeyCase, io, str_to_camel_case, str_to_snake_case};
pub use sakusou_transport::UploadFile;

// Module declarations
pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod examine;
pub mod factory;
pub mod harness;
pub mod observability;

#[cfg(feature = "trace")]
#[cfg_attr(docsrs, doc(cfg(feature = "trace")))]
pub use observability::init_tracing;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;
pub use serde_json::Value as JsonValue;

#[doc(hidden)]
pub use tracing as __tracing;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use sakusou::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ApiClient, Category, ClientConfig, ClientCore, Entity, Error, Examine, HarnessOptions,
        JsonType, KeyCase, Method, Request, Response, Result, Suite, UploadFile, empty_body,
        factory, skip_unless,
    };
}

/// Crate version, from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
