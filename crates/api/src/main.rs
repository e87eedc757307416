use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use putting_api::config::ServerConfig;
use putting_api::router::build_app_router;
use putting_api::state::AppState;
use putting_db::DbPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "putting_api=debug,putting_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        default_season = %config.default_season,
        "Loaded server configuration",
    );

    // --- Database ---
    let pool = connect_storage(&config).await;

    // --- App state ---
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    if let Some(pool) = pool {
        let timeout = Duration::from_secs(config.shutdown_timeout_secs);
        if tokio::time::timeout(timeout, pool.close()).await.is_err() {
            tracing::warn!(?timeout, "Timed out closing database pool");
        } else {
            tracing::info!("Database pool closed");
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Connect, verify and migrate the database.
///
/// Returns `None` when `DATABASE_URL` is unset or any step fails; the server
/// then runs without storage (reads return empty results, writes 503).
async fn connect_storage(config: &ServerConfig) -> Option<DbPool> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set, running without storage");
        return None;
    };

    let pool = match putting_db::create_pool(database_url, config.db_max_connections).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database, running without storage");
            return None;
        }
    };
    tracing::info!(max_connections = config.db_max_connections, "Database connection pool created");

    if let Err(e) = putting_db::health_check(&pool).await {
        tracing::error!(error = %e, "Database health check failed, running without storage");
        return None;
    }
    tracing::info!("Database health check passed");

    if let Err(e) = putting_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "Failed to run database migrations, running without storage");
        return None;
    }
    tracing::info!("Database migrations applied");

    Some(pool)
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
