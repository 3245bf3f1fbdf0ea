//! Integration tests for the banner and health endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_root_banner() {
    let app = TestApp::new();
    let response = app.request("GET", "/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["message"].is_string());
    assert!(response.body["version"].is_string());
}

#[tokio::test]
async fn test_health_reports_store() {
    let app = TestApp::new();
    let response = app.request("GET", "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["store"], "memory");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();
    let response = app.request("GET", "/sessions", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
