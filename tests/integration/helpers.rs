//! Shared test helpers for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::extract::ConnectInfo;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use sessionhub_api::{AppState, ServerIdentity, build_router};
use sessionhub_cipher::CipherContext;
use sessionhub_core::config::{AppConfig, CipherConfig};
use sessionhub_core::time::LocalClock;
use sessionhub_database::MemorySessionRepository;
use sessionhub_entity::session::NetworkInfo;
use sessionhub_service::SessionManager;

/// IP reported for the test host.
pub const SERVER_IP: &str = "192.168.50.1";
/// Hardware address reported for the test host.
pub const SERVER_MAC: &str = "02:00:00:00:00:01";

fn cipher() -> Arc<CipherContext> {
    static CIPHER: OnceLock<Arc<CipherContext>> = OnceLock::new();
    CIPHER
        .get_or_init(|| {
            Arc::new(
                CipherContext::generate(&CipherConfig { key_bits: 1024 })
                    .expect("Failed to generate test key pair"),
            )
        })
        .clone()
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store backing the router, for direct inspection
    pub repo: MemorySessionRepository,
    /// Session manager sharing the router's store and cipher
    pub manager: SessionManager,
}

impl TestApp {
    /// Create a new test application with an empty store
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.store.provider = "memory".to_string();

        let repo = MemorySessionRepository::new();
        let clock = LocalClock::from_config(&config.session).expect("Invalid test offset");
        let manager = SessionManager::new(Arc::new(repo.clone()), cipher(), clock);
        let identity = ServerIdentity::new(NetworkInfo::new(SERVER_IP, SERVER_MAC));

        let state = AppState::new(config, manager.clone(), Arc::new(repo.clone()), identity);

        Self {
            router: build_router(state),
            repo,
            manager,
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        self.send(method, path, body, None, None).await
    }

    /// Make an HTTP request as if it arrived from `peer`, optionally proxied
    pub async fn request_from(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        peer: &str,
        forwarded_for: Option<&str>,
    ) -> TestResponse {
        let peer: SocketAddr = peer.parse().expect("Invalid peer address");
        self.send(method, path, body, Some(peer), forwarded_for).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        peer: Option<SocketAddr>,
        forwarded_for: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(forwarded_for) = forwarded_for {
            req = req.header("X-Forwarded-For", forwarded_for);
        }

        let mut req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        if let Some(peer) = peer {
            req.extensions_mut().insert(ConnectInfo(peer));
        }

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Log in with default credentials and return the new session id
    pub async fn login(&self) -> String {
        let response = self
            .request_from(
                "POST",
                "/login",
                Some(serde_json::json!({
                    "email": "ana@example.com",
                    "nickname": "ana",
                    "macAddress": "AA:BB:CC:DD:EE:FF",
                })),
                "10.0.0.7:51000",
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["session"]["sessionId"]
            .as_str()
            .expect("No sessionId in login response")
            .to_string()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
