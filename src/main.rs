//! SessionHub Server: HTTP client session tracking
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use sessionhub_api::{AppState, ServerIdentity, build_router};
use sessionhub_cipher::CipherContext;
use sessionhub_core::config::{AppConfig, StoreProvider};
use sessionhub_core::error::AppError;
use sessionhub_core::time::LocalClock;
use sessionhub_database::{
    DatabasePool, MemorySessionRepository, PgSessionRepository, SessionRepository,
};
use sessionhub_service::SessionManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("SESSIONHUB_CONFIG") {
        Ok(path) => AppConfig::load_from(&path),
        Err(_) => {
            let env =
                std::env::var("SESSIONHUB_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SessionHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Session store ────────────────────────────────────
    let provider = config.store.provider()?;
    tracing::info!("Initializing session store (provider: {})...", provider);

    let (session_repo, db_pool): (Arc<dyn SessionRepository>, Option<DatabasePool>) =
        match provider {
            StoreProvider::Postgres => {
                let pool = DatabasePool::connect(&config.database).await?;
                tracing::info!("Running database migrations...");
                pool.migrate().await?;
                tracing::info!("Database migrations complete");
                let repo: Arc<dyn SessionRepository> =
                    Arc::new(PgSessionRepository::new(pool.pool().clone()));
                (repo, Some(pool))
            }
            StoreProvider::Memory => {
                tracing::warn!("Using in-memory session store; sessions are lost on restart");
                let repo: Arc<dyn SessionRepository> = Arc::new(MemorySessionRepository::new());
                (repo, None)
            }
        };

    // ── Step 2: Hardware-address cipher ──────────────────────────
    tracing::info!(
        "Generating {}-bit cipher key pair...",
        config.cipher.key_bits
    );
    let cipher = Arc::new(CipherContext::generate(&config.cipher)?);

    // ── Step 3: Local clock and server identity ──────────────────
    let clock = LocalClock::from_config(&config.session)?;
    tracing::info!("Session timestamps use UTC offset {}", clock.offset());

    let server_identity = ServerIdentity::detect(&config.server.identity);

    // ── Step 4: Services and router ──────────────────────────────
    let session_manager = SessionManager::new(Arc::clone(&session_repo), cipher, clock);
    let app_state = AppState::new(
        config.clone(),
        session_manager,
        session_repo,
        server_identity,
    );
    let app = build_router(app_state);

    // ── Step 5: Bind and serve ───────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SessionHub server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    })
    .await
    .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 6: Release the database pool ────────────────────────
    if let Some(pool) = db_pool {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, pool.close()).await.is_err() {
            tracing::warn!("Database pool did not close within {:?}", grace);
        }
    }

    tracing::info!("SessionHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
