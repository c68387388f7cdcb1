//! API client contract and the request plumbing behind it
//!
//! A per-service client implements [`ApiClient`] by owning a [`ClientCore`]
//! and describing its calls through an `Endpoint` type. URL assembly, header
//! defaults, body re-keying and dispatch come for free as provided methods.
//!
//! # Example
//!
//! ```rust,no_run
//! use async_trait::async_trait;
//! use sakusou::client::{ApiClient, ClientCore, Method, Request, Response};
//! use serde_json::{Map, json};
//!
//! enum UsersEndpoint {
//!     Show { id: u64 },
//!     Create { user_name: String },
//! }
//!
//! struct UsersClient {
//!     core: ClientCore,
//! }
//!
//! #[async_trait]
//! impl ApiClient for UsersClient {
//!     type Endpoint = UsersEndpoint;
//!
//!     fn core(&self) -> &ClientCore {
//!         &self.core
//!     }
//!
//!     async fn request(&self, endpoint: UsersEndpoint) -> sakusou::Result<(Request, Response)> {
//!         let headers = self.prepare_request_headers(Vec::<(&str, &str)>::new())?;
//!         match endpoint {
//!             UsersEndpoint::Show { id } => {
//!                 let path = ClientCore::join_path(&["/v1/users", id.to_string().as_str()]);
//!                 let url = self.prepare_request_url(&path, None, None, None)?;
//!                 self.dispatch_request(&url, Method::Get, headers, None, None).await
//!             }
//!             UsersEndpoint::Create { user_name } => {
//!                 let url = self.prepare_request_url("/v1/users", None, None, None)?;
//!                 let mut body = Map::new();
//!                 body.insert("user_name".into(), json!(user_name));
//!                 let body = self.convert_to_default_case_keys(&body);
//!                 self.dispatch_request(&url, Method::Post, headers, Some(body.into()), None).await
//!             }
//!         }
//!     }
//! }
//! ```

mod body;
mod base;
mod record;

pub use self::body::{
    convert_keys, convert_to_camel_case_keys, convert_to_snake_case_keys, empty_body,
    is_empty_body, merge_with_defaults,
};
pub use self::base::{ClientCore, DEFAULT_HEADERS};
pub use self::record::{Method, Request, Response};

use crate::error::Result;
use async_trait::async_trait;
use http::HeaderMap;
use sakusou_core::KeyCase;
use sakusou_transport::UploadFile;
use serde_json::{Map, Value};

/// Contract every per-service API client fulfils.
///
/// Implementors supply [`core`](Self::core) and [`request`](Self::request);
/// everything else forwards to the [`ClientCore`].
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Description of one call of the service (path, method, payload).
    type Endpoint: Send;

    /// Shared request plumbing of this client
    fn core(&self) -> &ClientCore;

    /// Perform one endpoint call.
    async fn request(&self, endpoint: Self::Endpoint) -> Result<(Request, Response)>;

    /// Host requests are sent to
    fn base_uri(&self) -> &str {
        self.core().base_uri()
    }

    /// URL scheme
    fn protocol(&self) -> &str {
        self.core().protocol()
    }

    /// Key case request bodies are converted to
    fn default_key_case(&self) -> KeyCase {
        self.core().default_key_case()
    }

    /// See [`ClientCore::prepare_request_url`].
    fn prepare_request_url(
        &self,
        path: &str,
        parameters: Option<&str>,
        query: Option<&str>,
        fragment: Option<&str>,
    ) -> Result<String> {
        self.core()
            .prepare_request_url(path, parameters, query, fragment)
    }

    /// See [`ClientCore::prepare_request_headers`].
    fn prepare_request_headers<I, K, V>(&self, headers: I) -> Result<HeaderMap>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.core().prepare_request_headers(headers)
    }

    /// Rewrite keys containing `_` to camelCase.
    fn convert_to_camel_case_keys(&self, body: &Map<String, Value>) -> Map<String, Value> {
        convert_to_camel_case_keys(body)
    }

    /// Rewrite every key to snake_case.
    fn convert_to_snake_case_keys(&self, body: &Map<String, Value>) -> Map<String, Value> {
        convert_to_snake_case_keys(body)
    }

    /// Rewrite keys to [`default_key_case`](Self::default_key_case).
    fn convert_to_default_case_keys(&self, body: &Map<String, Value>) -> Map<String, Value> {
        self.core().convert_to_default_case_keys(body)
    }

    /// See [`ClientCore::reprocess_request_body`].
    fn reprocess_request_body(
        &self,
        properties: &Map<String, Value>,
        defaults: &Map<String, Value>,
        convert_key: bool,
    ) -> Map<String, Value> {
        self.core()
            .reprocess_request_body(properties, defaults, convert_key)
    }

    /// See [`ClientCore::dispatch_request`].
    async fn dispatch_request(
        &self,
        url: &str,
        method: Method,
        headers: HeaderMap,
        body: Option<Value>,
        upload_file: Option<Vec<UploadFile>>,
    ) -> Result<(Request, Response)> {
        self.core()
            .dispatch_request(url, method, headers, body, upload_file)
            .await
    }
}
