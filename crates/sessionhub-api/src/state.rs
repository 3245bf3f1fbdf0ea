//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sessionhub_core::config::AppConfig;
use sessionhub_database::SessionRepository;
use sessionhub_service::SessionManager;

use crate::network::ServerIdentity;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Session lifecycle manager
    pub session_manager: Arc<SessionManager>,
    /// Session store, for health reporting
    pub session_repo: Arc<dyn SessionRepository>,
    /// Network identity of this host, resolved at startup
    pub server_identity: Arc<ServerIdentity>,
}

impl AppState {
    /// Creates the shared state.
    pub fn new(
        config: AppConfig,
        session_manager: SessionManager,
        session_repo: Arc<dyn SessionRepository>,
        server_identity: ServerIdentity,
    ) -> Self {
        Self {
            config: Arc::new(config),
            session_manager: Arc::new(session_manager),
            session_repo,
            server_identity: Arc::new(server_identity),
        }
    }
}
