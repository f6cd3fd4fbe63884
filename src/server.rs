//! Server initialization and runtime setup for both tiers.
//!
//! Handles the database pool, migrations, service wiring, and the Axum server
//! lifecycle including graceful shutdown.

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{AdvancedTracker, ClickLogger, MappingService, ResolutionService};
use crate::config::{Config, ProxyConfig};
use crate::edge::Forwarder;
use crate::infrastructure::persistence::{
    PgClickRepository, PgMappingRepository, PgTrackingRepository,
};
use crate::routes::{app_router, edge_router};
use crate::state::{AppState, EdgeState};

/// Creates the PostgreSQL pool from the configured pool settings.
///
/// # Errors
///
/// Returns an error if no connection can be established.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Wires repositories and services into the resolution tier state.
pub fn build_state(pool: PgPool, config: &Config) -> AppState {
    let pool = Arc::new(pool);

    let mapping_repository = Arc::new(PgMappingRepository::new(pool.clone()));
    let click_repository = Arc::new(PgClickRepository::new(pool.clone()));

    let tracker = config.advanced_tracking.then(|| {
        AdvancedTracker::new(Arc::new(PgTrackingRepository::new(pool.clone())))
    });

    let resolution_service = Arc::new(ResolutionService::new(
        mapping_repository.clone(),
        ClickLogger::new(click_repository),
        tracker,
    ));
    let mapping_service = Arc::new(MappingService::new(mapping_repository));

    AppState::new(resolution_service, mapping_service, config.behind_proxy)
}

/// Runs the tracking API with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Schema migrations
/// - Resolution and mapping services
/// - Axum HTTP server with peer address info
///
/// # Errors
///
/// Returns an error if the database is unreachable, migrations fail, or the
/// listener cannot bind.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let state = build_state(pool, &config);
    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Tracking API listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Runs the public edge proxy.
///
/// # Errors
///
/// Returns an error if the upstream client cannot be built or the listener
/// cannot bind.
pub async fn run_edge_proxy(config: ProxyConfig) -> Result<()> {
    let forwarder = Forwarder::new(config.tracking_api_url.clone(), &config.transport())
        .context("Failed to build upstream client")?;

    let app = edge_router(EdgeState::new(Arc::new(forwarder)));

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Edge proxy listening on http://{addr}, forwarding to {}",
        config.tracking_api_url
    );

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
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

    tracing::info!("Shutdown signal received");
}
