//! Transport trait and wire types
//!
//! Defines the generic Transport trait and the request/response shapes that
//! cross it. Header maps are ordered by name so rendered requests are stable.

use crate::error::{Result, TransportError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;

/// A file part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Form field name
    pub field: String,

    /// File name reported to the server
    pub file_name: String,

    /// Raw file content
    pub content: Vec<u8>,

    /// MIME type of the content
    pub content_type: String,
}

impl UploadFile {
    /// Create an upload part from in-memory content
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        content: impl Into<Vec<u8>>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }

    /// Create an upload part by reading a file from disk.
    ///
    /// The reported file name is the final path component.
    pub async fn from_path(
        field: impl Into<String>,
        path: impl AsRef<Path>,
        content_type: impl Into<String>,
    ) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                TransportError::Other(format!("Not a file path: {}", path.display()))
            })?;

        Ok(Self::new(field, file_name, content, content_type))
    }
}

/// Body carried by an [`HttpRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum HttpBody {
    /// Raw bytes, sent as-is
    Bytes(Vec<u8>),

    /// `multipart/form-data` with text fields and file parts
    Multipart {
        /// Text fields, in order
        fields: Vec<(String, String)>,
        /// File parts, in order
        files: Vec<UploadFile>,
    },
}

impl HttpBody {
    /// Size in bytes of the payload (file content plus text fields)
    pub fn len(&self) -> usize {
        match self {
            Self::Bytes(bytes) => bytes.len(),
            Self::Multipart { fields, files } => {
                fields.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>()
                    + files.iter().map(|f| f.content.len()).sum::<usize>()
            }
        }
    }

    /// Whether the payload carries no data
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// HTTP request to send
///
/// Represents an HTTP request to be sent via the Transport.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method (GET, POST, etc.)
    pub method: String,

    /// Request URL
    pub url: String,

    /// Request headers, keyed by lower-case name
    pub headers: BTreeMap<String, String>,

    /// Request body (optional)
    pub body: Option<HttpBody>,
}

impl HttpRequest {
    /// Create a new HTTP request
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    /// Add a header to the request
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Set the request body
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(HttpBody::Bytes(body));
        self
    }

    /// Set a multipart body
    pub fn with_multipart(mut self, fields: Vec<(String, String)>, files: Vec<UploadFile>) -> Self {
        self.body = Some(HttpBody::Multipart { fields, files });
        self
    }
}

/// HTTP response
///
/// Represents an HTTP response received from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Reason phrase for the status, when one is known
    pub reason: Option<String>,

    /// Response headers in arrival order; repeated names appear repeatedly
    pub headers: Vec<(String, String)>,

    /// Response body
    pub body: Vec<u8>,

    /// Headers the transport actually put on the wire, keyed by lower-case
    /// name. `None` when the transport cannot report them.
    pub request_headers: Option<BTreeMap<String, String>>,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            reason: None,
            headers,
            body,
            request_headers: None,
        }
    }

    /// Record the headers that were sent
    pub fn with_request_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.request_headers = Some(headers);
        self
    }

    /// Set the reason phrase
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Get the response body as a string
    pub fn text(&self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.clone())
    }

    /// Parse response body as JSON
    ///
    /// # Errors
    ///
    /// Returns an error if the response body cannot be parsed as valid JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Into::into)
    }

    /// Get a header value by name (case-insensitive).
    ///
    /// Repeated headers are joined with `", "`.
    pub fn get_header(&self, name: &str) -> Option<String> {
        let values: Vec<&str> = self
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect();

        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    /// Headers folded into one entry per name, in first-seen order.
    ///
    /// Repeated headers are joined with `", "`.
    pub fn folded_headers(&self) -> Vec<(String, String)> {
        let mut folded: Vec<(String, String)> = Vec::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            match folded
                .iter_mut()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
            {
                Some((_, existing)) => {
                    existing.push_str(", ");
                    existing.push_str(value);
                }
                None => folded.push((name.clone(), value.clone())),
            }
        }
        folded
    }
}

/// Generic transport trait for sending HTTP exchanges
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send an HTTP request and receive a response
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse>;

    /// Transport name for logging
    fn name(&self) -> &'static str {
        "http"
    }
}
