//! HTTP transport client implementation
//!
//! Implements the Transport trait on top of reqwest. A single exchange is
//! attempted per call: there is no retry loop, and transport failures are
//! returned to the caller unchanged.

use crate::error::{Result, TransportError};
use crate::traits::{HttpBody, HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::multipart::{Form, Part};
use std::sync::Arc;
use std::time::Duration;

/// HTTP transport implementation
///
/// Handles HTTP requests with:
/// - Raw byte and `multipart/form-data` bodies
/// - Connection pooling
/// - An optional whole-request timeout
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Arc<ReqwestClient>,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(Default::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            timeout: config.timeout,
        })
    }

    /// Get a reference to the underlying reqwest client
    pub fn reqwest_client(&self) -> Arc<ReqwestClient> {
        self.client.clone()
    }

    /// Configured request timeout, if any
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send_http(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method_upper = request.method.to_uppercase();
        let method = match method_upper.as_str() {
            "GET" => reqwest::Method::GET,
            "POST" => reqwest::Method::POST,
            "PUT" => reqwest::Method::PUT,
            "DELETE" => reqwest::Method::DELETE,
            "PATCH" => reqwest::Method::PATCH,
            "HEAD" => reqwest::Method::HEAD,
            "OPTIONS" => reqwest::Method::OPTIONS,
            _ => return Err(TransportError::UnsupportedMethod(request.method)),
        };

        tracing::trace!(method = %method_upper, url = %request.url, transport = self.name(), "Dispatching request");
        let mut req = self.client.request(method, &request.url);

        // Add headers
        for (key, value) in &request.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        // Add body if present
        match request.body {
            None => {}
            Some(HttpBody::Bytes(body)) => {
                req = req.body(body);
            }
            Some(HttpBody::Multipart { fields, files }) => {
                req = req.multipart(build_form(fields, files)?);
            }
        }

        // Multipart bodies get their content type (with boundary) here, so
        // read the final header set off the built request
        let built = req.build()?;
        let request_headers = built
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        // Send request
        let response = self.client.execute(built).await?;

        let status = response.status();
        let reason = status.canonical_reason().map(str::to_string);

        // Collect headers; values that are not visible ASCII are decoded lossily
        let headers = response
            .headers()
            .iter()
            .map(|(key, value)| {
                (
                    key.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        // Collect body
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status: status.as_u16(),
            reason,
            headers,
            body,
            request_headers: Some(request_headers),
        })
    }
}

fn build_form(
    fields: Vec<(String, String)>,
    files: Vec<crate::traits::UploadFile>,
) -> Result<Form> {
    let mut form = Form::new();

    for (name, value) in fields {
        form = form.text(name, value);
    }

    for file in files {
        let part = Part::bytes(file.content)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| TransportError::Http(format!("Invalid content type: {}", e)))?;
        form = form.part(file.field, part);
    }

    Ok(form)
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Whole-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,

    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            connect_timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 10,
        }
    }
}
