//! Integration tests for transport configuration and middleware.

use hammer::tower::util::MapRequestLayer;
use hammer::{HyperTransport, Request, RequestSpec};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

/// Test that logging middleware doesn't break request/response flow.
#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/logged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged": true})))
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::builder().with_debug_logging().build();

    let response = RequestSpec::new()
        .get()
        .with_url(format!("{}/logged", mock_server.uri()))
        .with_basic_auth("user", "pass")
        .dispatch(&transport)
        .await
        .expect("response");

    assert!(response.is_success());
}

/// Test that configured headers are sent, and request headers take precedence.
#[tokio::test]
async fn test_default_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/configured"))
        .and(header("User-Agent", "inventory-sync/2.1"))
        .and(header("X-Tenant", "override"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::builder()
        .user_agent("inventory-sync/2.1")
        .default_header("X-Tenant", "default")
        .default_header("Accept", "application/json")
        .build();

    let response = RequestSpec::new()
        .get()
        .with_url(format!("{}/configured", mock_server.uri()))
        .with_header("x-tenant", "override")
        .dispatch(&transport)
        .await
        .expect("response");

    assert!(response.is_success());
}

/// Test that a custom tower layer sees the finalized request.
#[tokio::test]
async fn test_custom_layer() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/employees/3"))
        .and(header("X-Request-Id", "req-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HyperTransport::builder()
        .with_logging()
        .layer(MapRequestLayer::new(|mut request: Request| {
            request
                .headers_mut()
                .insert("X-Request-Id".to_string(), "req-1".to_string());
            request
        }))
        .build();

    let response = RequestSpec::new()
        .put()
        .with_url(format!("{}/employees", mock_server.uri()))
        .with_id(3)
        .with_raw_body("payload")
        .dispatch(&transport)
        .await
        .expect("response");

    assert!(response.is_success());
}
