//! HTTP transport layer for sakusou API clients
//!
//! Provides a trait-based transport abstraction so API clients can be driven
//! by the real reqwest-backed transport or by an in-memory double in tests.
//!
//! # Architecture
//!
//! - **Transport trait**: generic interface for sending one HTTP exchange
//! - **HTTP transport**: reqwest client with JSON and multipart bodies
//! - **curl rendering**: reproduce any request as a shell command line
//! - **Error handling**: one error type for every transport failure
//!
//! # Usage
//!
//! ```ignore
//! use sakusou_transport::{HttpRequest, HttpTransport, Transport};
//!
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new("GET", "https://api.example.com/v1/users");
//! let response = transport.send_http(request).await?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod curl;
pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use curl::to_curl;
pub use error::{Result, TransportError};
pub use http::{HttpTransport, HttpTransportConfig};
pub use traits::{HttpBody, HttpRequest, HttpResponse, Transport, UploadFile};
