//! Integration tests for the session lifecycle endpoints.

use http::StatusCode;
use serde_json::json;

use sessionhub_core::traits::Repository;
use sessionhub_core::types::SessionId;
use sessionhub_entity::session::SessionStatus;

use crate::helpers::{SERVER_IP, SERVER_MAC, TestApp};

async fn stored_status(app: &TestApp, session_id: &str) -> SessionStatus {
    let id: SessionId = session_id.parse().expect("Invalid session id");
    app.repo
        .find_by_id(&id)
        .await
        .expect("Store lookup failed")
        .expect("Session missing from store")
        .status
}

#[tokio::test]
async fn test_login_creates_active_session() {
    let app = TestApp::new();
    let response = app
        .request_from(
            "POST",
            "/login",
            Some(json!({
                "email": "ana@example.com",
                "nickname": "ana",
                "macAddress": "AA:BB:CC:DD:EE:FF",
            })),
            "10.0.0.7:51000",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let session = &response.body["session"];
    assert_eq!(session["email"], "ana@example.com");
    assert_eq!(session["status"], "Active");
    assert_eq!(session["clientInfo"]["ip"], "10.0.0.7");
    assert_eq!(session["serverInfo"]["ip"], SERVER_IP);
    assert_eq!(session["serverInfo"]["mac"], SERVER_MAC);
    assert_eq!(session["createdAt"], session["updatedAt"]);
    assert_eq!(session["createdAt"], session["lastAccessed"]);

    let token = session["clientInfo"]["mac"].as_str().unwrap();
    assert_ne!(token, "AA:BB:CC:DD:EE:FF");
    assert!(app.manager.cipher().matches(token, "AA:BB:CC:DD:EE:FF"));
}

#[tokio::test]
async fn test_login_missing_field_is_rejected() {
    let app = TestApp::new();

    for body in [
        json!({ "nickname": "ana", "macAddress": "AA:BB:CC:DD:EE:FF" }),
        json!({ "email": "ana@example.com", "macAddress": "AA:BB:CC:DD:EE:FF" }),
        json!({ "email": "ana@example.com", "nickname": "ana", "macAddress": "" }),
    ] {
        let response = app.request("POST", "/login", Some(body)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }

    assert_eq!(app.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_login_rejects_non_object_body() {
    let app = TestApp::new();
    let response = app
        .request("POST", "/login", Some(json!(["not", "an", "object"])))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request("POST", "/login", Some(json!("ana@example.com")))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_logout_rejects_array_body() {
    let app = TestApp::new();
    let session_id = app.login().await;

    let response = app
        .request("POST", "/logout", Some(json!([session_id])))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_client_ip_resolution() {
    let app = TestApp::new();
    let body = json!({
        "email": "ana@example.com",
        "nickname": "ana",
        "macAddress": "AA:BB:CC:DD:EE:FF",
    });

    let proxied = app
        .request_from(
            "POST",
            "/login",
            Some(body.clone()),
            "10.0.0.1:40000",
            Some("203.0.113.9, 10.0.0.1"),
        )
        .await;
    assert_eq!(proxied.body["session"]["clientInfo"]["ip"], "203.0.113.9");

    let mapped = app
        .request_from("POST", "/login", Some(body.clone()), "[::ffff:10.0.0.3]:40000", None)
        .await;
    assert_eq!(mapped.body["session"]["clientInfo"]["ip"], "10.0.0.3");

    let local = app
        .request_from("POST", "/login", Some(body.clone()), "127.0.0.1:40000", None)
        .await;
    assert_eq!(local.body["session"]["clientInfo"]["ip"], SERVER_IP);

    let unknown = app.request("POST", "/login", Some(body)).await;
    assert_eq!(unknown.body["session"]["clientInfo"]["ip"], "0.0.0.0");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let app = TestApp::new();
    let session_id = app.login().await;

    let response = app
        .request("POST", "/logout", Some(json!({ "sessionId": session_id })))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["session"]["status"], "Ended");
    assert_eq!(stored_status(&app, &session_id).await, SessionStatus::Ended);
}

#[tokio::test]
async fn test_logout_unknown_session() {
    let app = TestApp::new();
    app.login().await;

    let response = app
        .request(
            "POST",
            "/logout",
            Some(json!({ "sessionId": SessionId::new().to_string() })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(app.repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_logout_requires_session_id() {
    let app = TestApp::new();

    let response = app.request("POST", "/logout", Some(json!({}))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("POST", "/logout", Some(json!({ "sessionId": "abc" })))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_reactivates_ended_session() {
    let app = TestApp::new();
    let session_id = app.login().await;
    app.request("POST", "/logout", Some(json!({ "sessionId": session_id })))
        .await;

    let response = app
        .request_from(
            "PUT",
            "/update",
            Some(json!({ "sessionId": session_id })),
            "10.0.0.8:52000",
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let session = &response.body["session"];
    assert_eq!(session["sessionId"], session_id.as_str());
    assert_eq!(session["status"], "Active");
    assert_eq!(session["email"], "ana@example.com");
    assert_eq!(session["nickname"], "ana");
    assert_eq!(session["clientInfo"]["ip"], "10.0.0.8");
    assert_eq!(stored_status(&app, &session_id).await, SessionStatus::Active);
}

#[tokio::test]
async fn test_update_unknown_session() {
    let app = TestApp::new();
    let response = app
        .request(
            "PUT",
            "/update",
            Some(json!({ "sessionId": SessionId::new().to_string() })),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_status_reports_inactivity_without_writing() {
    let app = TestApp::new();
    let session_id = app.login().await;
    let id: SessionId = session_id.parse().unwrap();
    let before = app.repo.find_by_id(&id).await.unwrap().unwrap();

    let response = app
        .request("GET", &format!("/status?sessionId={session_id}"), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let session = &response.body["session"];
    assert_eq!(session["sessionId"], session_id.as_str());
    assert!(session["inactivityTime"]["hours"].is_i64());
    assert!(session["inactivityTime"]["formatted"].is_string());

    let after = app.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(after.updated_at, before.updated_at);
    assert_eq!(after.last_accessed, before.last_accessed);
}

#[tokio::test]
async fn test_status_input_errors() {
    let app = TestApp::new();

    let response = app.request("GET", "/status", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("GET", "/status?sessionId=not-a-uuid", None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "GET",
            &format!("/status?sessionId={}", SessionId::new()),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_current_sessions() {
    let app = TestApp::new();

    let empty = app.request("GET", "/listCurrentSessions", None).await;
    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.body["count"], 0);
    assert_eq!(empty.body["sessions"], json!([]));

    let kept = app.login().await;
    let ended = app.login().await;
    app.request("POST", "/logout", Some(json!({ "sessionId": ended })))
        .await;

    let response = app.request("GET", "/listCurrentSessions", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["count"], 1);
    let sessions = response.body["sessions"].as_array().unwrap();
    assert_eq!(sessions[0]["sessionId"], kept.as_str());
    assert_eq!(sessions[0]["status"], "Active");
    assert!(sessions[0]["inactivityTime"]["formatted"].is_string());
}
