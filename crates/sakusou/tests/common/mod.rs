//! Shared fixtures for sakusou integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use sakusou::client::{ApiClient, ClientCore, Method, Request, Response};
use sakusou::{ClientConfig, Entity, KeyCase, Result};
use sakusou_transport::{HttpRequest, HttpResponse, Transport, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

/// Client core pointed at a running mock server.
pub fn core_for(server: &MockServer, key_case: KeyCase) -> ClientCore {
    let config = ClientConfig::builder()
        .base_uri(server.address().to_string())
        .protocol("http")
        .default_key_case(key_case)
        .build();
    ClientCore::from_config(config).unwrap()
}

/// In-memory transport that records requests and replays one response.
pub struct RecordingTransport {
    sent: Mutex<Vec<HttpRequest>>,
    reply: HttpResponse,
}

impl RecordingTransport {
    pub fn replying(reply: HttpResponse) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            reply,
        })
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_http(&self, request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Transport that always fails below HTTP.
pub struct RefusingTransport;

#[async_trait]
impl Transport for RefusingTransport {
    async fn send_http(&self, _request: HttpRequest) -> std::result::Result<HttpResponse, TransportError> {
        Err(TransportError::Connection("connection refused".into()))
    }
}

/// User resource as returned by the users service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub user_name: Option<String>,
    pub email_address: Option<String>,
}

impl Entity for User {
    const PROPERTY_NAMES: &'static [&'static str] = &["userId", "userName", "emailAddress"];
}

/// Calls of the users service.
pub enum UsersEndpoint {
    Show { user_id: i64 },
    Search { name: String },
    Create { properties: Map<String, Value> },
    Remove { user_id: i64 },
}

/// A concrete per-service client, as a test suite would write it.
pub struct UsersClient {
    core: ClientCore,
}

impl UsersClient {
    pub fn new(core: ClientCore) -> Self {
        Self { core }
    }

    fn defaults() -> Map<String, Value> {
        match json!({"user_name": "anonymous", "email_address": null}) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

#[async_trait]
impl ApiClient for UsersClient {
    type Endpoint = UsersEndpoint;

    fn core(&self) -> &ClientCore {
        &self.core
    }

    async fn request(&self, endpoint: UsersEndpoint) -> Result<(Request, Response)> {
        let headers = self.prepare_request_headers([("x-client", "users")])?;
        match endpoint {
            UsersEndpoint::Show { user_id } => {
                let path = ClientCore::join_path(&["/v1/users", user_id.to_string().as_str()]);
                let url = self.prepare_request_url(&path, None, None, None)?;
                self.dispatch_request(&url, Method::Get, headers, None, None)
                    .await
            }
            UsersEndpoint::Search { name } => {
                let query = ClientCore::prepare_query_string([("name", name.as_str())]);
                let url = self.prepare_request_url("/v1/users", None, Some(&query), None)?;
                self.dispatch_request(&url, Method::Get, headers, None, None)
                    .await
            }
            UsersEndpoint::Create { properties } => {
                let url = self.prepare_request_url("/v1/users", None, None, None)?;
                let body = self.reprocess_request_body(&properties, &Self::defaults(), true);
                self.dispatch_request(&url, Method::Post, headers, Some(Value::Object(body)), None)
                    .await
            }
            UsersEndpoint::Remove { user_id } => {
                let path = ClientCore::join_path(&["/v1/users", user_id.to_string().as_str()]);
                let url = self.prepare_request_url(&path, None, None, None)?;
                self.dispatch_request(
                    &url,
                    Method::Delete,
                    headers,
                    Some(sakusou::empty_body()),
                    None,
                )
                .await
            }
        }
    }
}
