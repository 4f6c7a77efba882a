//! HTTP server initialization and runtime setup.
//!
//! Owns the process-wide resources: the database pool is created once here,
//! shared through [`AppState`], and closed after the server and click worker
//! have stopped.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::domain::click_worker::run_click_worker;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Background click worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// On shutdown the click queue is drained before the pool is closed.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let pool = Arc::new(pool);
    let link_repository: Arc<dyn LinkRepository> = Arc::new(PgLinkRepository::new(pool.clone()));

    let (click_tx, click_rx) = mpsc::channel(config.click_queue_capacity);
    let click_worker = tokio::spawn(run_click_worker(
        click_rx,
        link_repository.clone(),
        config.click_worker_concurrency,
    ));
    tracing::info!("Click worker started");

    let link_service = Arc::new(LinkService::new(link_repository, config.code_length));
    let state = AppState::new(link_service, click_tx);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("HTTP server stopped, draining click queue");

    if let Err(e) = click_worker.await {
        tracing::error!(error = %e, "Click worker terminated abnormally");
    }

    pool.close().await;
    tracing::info!("Database pool closed");

    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("signal error: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}
