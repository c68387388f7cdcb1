//! Request/response records returned by a dispatch

use sakusou_transport::{HttpResponse, UploadFile};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// HTTP methods an API client dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
    /// `PATCH`
    Patch,
}

impl Method {
    /// Upper-case verb
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            _ => Err(crate::Error::config(format!("Unknown HTTP method: {}", s))),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => http::Method::GET,
            Method::Post => http::Method::POST,
            Method::Put => http::Method::PUT,
            Method::Delete => http::Method::DELETE,
            Method::Patch => http::Method::PATCH,
        }
    }
}

/// What was sent, kept for audit and debugging.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    uri: String,
    method: Method,
    headers: BTreeMap<String, String>,
    body: Option<Value>,
    upload_file: Option<Vec<UploadFile>>,
    curl: String,
}

impl Request {
    pub(crate) fn new(
        uri: impl Into<String>,
        method: Method,
        headers: BTreeMap<String, String>,
        body: Option<Value>,
        upload_file: Option<Vec<UploadFile>>,
        curl: impl Into<String>,
    ) -> Self {
        Self {
            uri: uri.into(),
            method,
            headers,
            body,
            upload_file,
            curl: curl.into(),
        }
    }

    /// Full request URL
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// HTTP method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Headers as sent, keyed by lower-case name.
    ///
    /// These are the transport's final headers when it reports them, so an
    /// upload carries the multipart `content-type` with its boundary.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// JSON body, `None` when no body was sent
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Multipart file parts, if the request was an upload
    pub fn upload_file(&self) -> Option<&[UploadFile]> {
        self.upload_file.as_deref()
    }

    /// Shell command reproducing the request.
    ///
    /// Rendered before sending; for uploads `curl -F` picks its own
    /// multipart boundary, so no `content-type` header is included.
    pub fn curl(&self) -> &str {
        &self.curl
    }
}

/// What came back, normalized for assertions.
///
/// Header values are JSON-decoded where possible (`x-count: 3` becomes the
/// number `3`) and kept as JSON strings otherwise. A body that is not valid
/// JSON becomes an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    status: u16,
    headers: Map<String, Value>,
    body: Value,
    reason: String,
}

impl Response {
    /// Create a response record directly, e.g. for assertion tests.
    pub fn new(
        status: u16,
        headers: Map<String, Value>,
        body: Value,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            reason: reason.into(),
        }
    }

    /// Normalize a raw transport response.
    pub fn from_http(response: &HttpResponse) -> Self {
        let body = serde_json::from_slice(&response.body).unwrap_or_else(|e| {
            if !response.body.is_empty() {
                tracing::debug!(error = %e, "Response body is not JSON; using an empty object");
            }
            Value::Object(Map::new())
        });

        let headers = response
            .folded_headers()
            .into_iter()
            .map(|(name, raw)| {
                let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
                (name, value)
            })
            .collect();

        Self {
            status: response.status,
            headers,
            body,
            reason: response.reason.clone().unwrap_or_default(),
        }
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Normalized headers
    pub fn headers(&self) -> &Map<String, Value> {
        &self.headers
    }

    /// Header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&Value> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Parsed body
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Body as an object, when it is one
    pub fn body_object(&self) -> Option<&Map<String, Value>> {
        self.body.as_object()
    }

    /// Reason phrase of the status, empty when unknown
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
