//! Placefinder HTTP service entry point.
//!
//! # Configuration
//!
//! - `GOOGLE_MAPS_API_KEY` - provider credential (required)
//! - `GOOGLE_MAPS_NEARBY_API_ENDPOINT`, `GOOGLE_MAPS_DETAILS_API_ENDPOINT`,
//!   `GOOGLE_MAPS_API_ENDPOINT` - provider endpoint overrides
//! - `POSTS_DIR` - Markdown posts directory (default: posts)
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `LOG_FORMAT`, `RUST_LOG` - logging
//! - `METRICS_ENABLED` - Prometheus recorder (default: true)

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;

use placefinder_service_shared::{
    AppState, LoggingConfig, MetricsConfig, MetricsError, ServiceConfig, init_logging,
    init_metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(&LoggingConfig::from_env());

    match init_metrics(&MetricsConfig::from_env()) {
        Ok(()) => info!("prometheus recorder installed"),
        Err(MetricsError::Disabled) => info!("metrics disabled"),
        Err(e) => return Err(e).context("failed to initialize metrics"),
    }

    let config = ServiceConfig::from_env().context("invalid service configuration")?;
    info!(
        port = config.port,
        posts_dir = %config.posts_dir.display(),
        "starting placefinder service"
    );

    let state = AppState::load(&config).context("failed to initialize application state")?;
    let app = placefinder_service::router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
