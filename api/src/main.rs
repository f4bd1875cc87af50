use anyhow::Result;
use std::net::SocketAddr;

mod handlers;
mod routes;
mod state;
mod templates;

use common::bootstrap::{init_booking_store, init_database_pool};
use common::config::Settings;
use common::telemetry;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Settings::load()?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    telemetry::init_logging(
        &config.observability.log_level,
        config.observability.json_logs,
    )?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        "Starting booking directory"
    );

    let metrics_handle = if config.observability.metrics_enabled {
        Some(telemetry::init_metrics()?)
    } else {
        tracing::info!("Metrics disabled by configuration");
        None
    };

    let db_pool = init_database_pool(&config).await?;
    let store = init_booking_store(db_pool.clone());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    let state = AppState::new(store, config, metrics_handle);
    let app = routes::create_router(state);

    tracing::info!(addr = %addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;
    tracing::info!("Booking directory stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Initiating graceful shutdown");
}
