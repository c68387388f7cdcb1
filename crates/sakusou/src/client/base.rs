//! Shared request plumbing behind every [`ApiClient`](super::ApiClient)

use super::body;
use super::record::{Method, Request, Response};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::observability::{RequestMetadata, RequestTimer, ResponseMetadata, log_transport_failure};
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use sakusou_core::KeyCase;
use sakusou_transport::{
    HttpBody, HttpRequest, HttpTransport, HttpTransportConfig, Transport, UploadFile, to_curl,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Headers every request starts from, before caller overrides.
pub const DEFAULT_HEADERS: [(&str, &str); 2] =
    [("content-type", "application/json"), ("accept", "*/*")];

/// Host, scheme, key case and transport shared by one API client.
///
/// Concrete clients hold a `ClientCore` and expose it through
/// [`ApiClient::core`](super::ApiClient::core); the trait's provided methods
/// forward here.
///
/// # Example
///
/// ```rust,no_run
/// use sakusou::client::{ClientCore, Method};
///
/// # async fn example() -> sakusou::Result<()> {
/// let core = ClientCore::new("api.example.com")?;
/// let url = core.prepare_request_url("/v1/users", None, Some("page=2"), None)?;
/// let headers = core.prepare_request_headers([("x-api-key", "secret")])?;
/// let (request, response) = core
///     .dispatch_request(&url, Method::Get, headers, None, None)
///     .await?;
/// println!("{} -> {}", request.curl(), response.status());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ClientCore {
    base_uri: String,
    protocol: String,
    default_key_case: KeyCase,
    default_headers: HeaderMap,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ClientCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCore")
            .field("base_uri", &self.base_uri)
            .field("protocol", &self.protocol)
            .field("default_key_case", &self.default_key_case)
            .field("default_headers", &self.default_headers)
            .field("transport", &self.transport.name())
            .finish()
    }
}

impl ClientCore {
    /// Create a client core for `base_uri` over `https` with camelCase keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn new(base_uri: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::with_base_uri(base_uri))
    }

    /// Create a client core from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_uri` is missing or the transport cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_uri = config
            .base_uri
            .ok_or_else(|| Error::config("base_uri is required to build a client"))?;

        let transport = HttpTransport::with_config(HttpTransportConfig {
            timeout: config.timeout,
            ..Default::default()
        })?;

        Ok(Self {
            base_uri,
            protocol: config.protocol,
            default_key_case: config.default_key_case,
            default_headers: config.default_headers,
            transport: Arc::new(transport),
        })
    }

    /// Replace the transport, e.g. with an in-memory double.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Host requests are sent to
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// URL scheme
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Case applied by [`convert_to_default_case_keys`](Self::convert_to_default_case_keys)
    pub fn default_key_case(&self) -> KeyCase {
        self.default_key_case
    }

    /// Join path components the way a POSIX path join does.
    ///
    /// A component starting with `/` discards everything before it.
    ///
    /// ```rust
    /// use sakusou::client::ClientCore;
    ///
    /// assert_eq!(ClientCore::join_path(&["/v1", "users", "42"]), "/v1/users/42");
    /// assert_eq!(ClientCore::join_path(&["/v1/", "/v2", "users"]), "/v2/users");
    /// ```
    pub fn join_path(parts: &[&str]) -> String {
        let mut path = String::new();
        for part in parts {
            if part.starts_with('/') {
                path = part.to_string();
            } else if path.is_empty() || path.ends_with('/') {
                path.push_str(part);
            } else {
                path.push('/');
                path.push_str(part);
            }
        }
        path
    }

    /// Encode key/value pairs as an `application/x-www-form-urlencoded` query.
    pub fn prepare_query_string<I, K, V>(pairs: I) -> String
    where
        I: IntoIterator,
        I::Item: std::borrow::Borrow<(K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish()
    }

    /// Assemble a request URL from the client's scheme and host.
    ///
    /// Components are joined as `scheme://host/path;parameters?query#fragment`,
    /// each separator only appearing when its component is non-empty. A `/`
    /// is inserted before a relative path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the assembled text is not a valid URL.
    pub fn prepare_request_url(
        &self,
        path: &str,
        parameters: Option<&str>,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<String> {
        let mut url = path.to_string();

        if let Some(parameters) = parameters.filter(|p| !p.is_empty()) {
            url = format!("{};{}", url, parameters);
        }

        if !url.is_empty() && !url.starts_with('/') {
            url.insert(0, '/');
        }
        url = format!("//{}{}", self.base_uri, url);

        if !self.protocol.is_empty() {
            url = format!("{}:{}", self.protocol, url);
        }

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        if let Some(fragment) = fragment.filter(|f| !f.is_empty()) {
            url.push('#');
            url.push_str(fragment);
        }

        url::Url::parse(&url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))?;
        Ok(url)
    }

    /// Build request headers: JSON defaults, then configured headers, then
    /// `headers`. Later entries win; names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if a header name or value is invalid.
    pub fn prepare_request_headers<I, K, V>(&self, headers: I) -> Result<HeaderMap>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut prepared = HeaderMap::new();
        prepared.insert(CONTENT_TYPE, HeaderValue::from_static(DEFAULT_HEADERS[0].1));
        prepared.insert(ACCEPT, HeaderValue::from_static(DEFAULT_HEADERS[1].1));

        for (name, value) in &self.default_headers {
            prepared.insert(name.clone(), value.clone());
        }

        for (name, value) in headers {
            let (name, value) = (name.as_ref(), value.as_ref());
            let name: HeaderName = name
                .parse()
                .map_err(|_| Error::InvalidHeaderName(name.to_string()))?;
            let value: HeaderValue = value
                .parse()
                .map_err(|_| Error::InvalidHeaderValue(value.to_string()))?;
            prepared.insert(name, value);
        }

        Ok(prepared)
    }

    /// Rewrite keys containing `_` to camelCase.
    pub fn convert_to_camel_case_keys(body: &Map<String, Value>) -> Map<String, Value> {
        body::convert_to_camel_case_keys(body)
    }

    /// Rewrite every key to snake_case.
    pub fn convert_to_snake_case_keys(body: &Map<String, Value>) -> Map<String, Value> {
        body::convert_to_snake_case_keys(body)
    }

    /// Rewrite keys to this client's default key case.
    pub fn convert_to_default_case_keys(&self, body: &Map<String, Value>) -> Map<String, Value> {
        body::convert_keys(body, self.default_key_case)
    }

    /// Rebuild a request body from `defaults`, overriding with `properties`.
    ///
    /// The result carries exactly the keys of `defaults`. With `convert_key`
    /// the keys are then rewritten to the default key case.
    pub fn reprocess_request_body(
        &self,
        properties: &Map<String, Value>,
        defaults: &Map<String, Value>,
        convert_key: bool,
    ) -> Map<String, Value> {
        let merged = body::merge_with_defaults(properties, defaults);
        if convert_key {
            self.convert_to_default_case_keys(&merged)
        } else {
            merged
        }
    }

    /// Send one request and return its audit record with the normalized response.
    ///
    /// - A body equal to [`empty_body`](super::empty_body) is not sent.
    /// - With `upload_file`, the body's entries become multipart text fields,
    ///   the files become file parts and the `content-type` header is removed
    ///   so the transport can set the multipart boundary.
    /// - Otherwise the body is sent as JSON bytes.
    ///
    /// # Errors
    ///
    /// Transport failures are returned unchanged; there are no retries. Error
    /// statuses are not errors and come back as a normal [`Response`].
    pub async fn dispatch_request(
        &self,
        url: &str,
        method: Method,
        mut headers: HeaderMap,
        body: Option<Value>,
        upload_file: Option<Vec<UploadFile>>,
    ) -> Result<(Request, Response)> {
        let body = body.filter(|b| !body::is_empty_body(b));

        let http_body = match &upload_file {
            Some(files) => {
                headers.remove(CONTENT_TYPE);
                Some(HttpBody::Multipart {
                    fields: body::form_fields(body.as_ref()),
                    files: files.clone(),
                })
            }
            None => match &body {
                Some(value) => Some(HttpBody::Bytes(serde_json::to_vec(value)?)),
                None => None,
            },
        };

        let sent_headers: BTreeMap<String, String> = headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let mut http_request = HttpRequest::new(method.as_str(), url);
        http_request.headers = sent_headers.clone();
        http_request.body = http_body;
        let curl = to_curl(&http_request);

        let mut metadata = RequestMetadata::new(method.as_str(), url);
        if let Some(payload) = &http_request.body {
            metadata = metadata.with_body_size(payload.len());
        }
        metadata.log_request(&curl);

        let timer = RequestTimer::start();
        let http_response = match self.transport.send_http(http_request).await {
            Ok(response) => response,
            Err(e) => {
                log_transport_failure(&metadata, timer.elapsed(), &e.to_string());
                return Err(e.into());
            }
        };

        ResponseMetadata::new(http_response.status, timer.elapsed())
            .with_body_size(http_response.body.len())
            .log_completion(&metadata);

        let response = Response::from_http(&http_response);
        let sent_headers = http_response.request_headers.unwrap_or(sent_headers);
        let request = Request::new(url, method, sent_headers, body, upload_file, curl);

        Ok((request, response))
    }
}
