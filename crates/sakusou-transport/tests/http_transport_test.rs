//! Integration tests for HTTP transport

use sakusou_transport::{HttpRequest, HttpTransport, Transport, TransportError, UploadFile};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_send_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/users"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"userName":"saku"}"#))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("x-request-id", "abc")
                .set_body_string(r#"{"id":1}"#),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new("POST", format!("{}/v1/users", mock_server.uri()))
        .with_header("Content-Type", "application/json")
        .with_body(br#"{"userName":"saku"}"#.to_vec());

    let response = transport.send_http(request).await.unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.reason.as_deref(), Some("Created"));
    assert_eq!(response.get_header("X-Request-Id").as_deref(), Some("abc"));
    assert_eq!(response.text().unwrap(), r#"{"id":1}"#);

    mock_server.verify().await;
}

#[tokio::test]
async fn test_send_multipart_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new("POST", format!("{}/upload", mock_server.uri())).with_multipart(
        vec![("title".into(), "avatar".into())],
        vec![UploadFile::new("file", "a.bin", vec![0u8; 16], "application/octet-stream")],
    );

    let response = transport.send_http(request).await.unwrap();
    assert_eq!(response.status, 200);

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let content_type = received[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let sent = response.request_headers.expect("headers sent");
    assert_eq!(sent.get("content-type"), Some(&content_type));

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains(r#"name="title""#));
    assert!(body.contains(r#"filename="a.bin""#));
}

#[tokio::test]
async fn test_error_status_is_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let response = transport
        .send_http(HttpRequest::new("GET", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.reason.as_deref(), Some("Not Found"));
}

#[tokio::test]
async fn test_connection_refused_propagates() {
    // Bind then drop a listener so the port is very likely closed
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .send_http(HttpRequest::new("GET", format!("http://127.0.0.1:{}/", port)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::Connection(_) | TransportError::Http(_)
    ));
}
