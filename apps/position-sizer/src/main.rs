//! Position Sizer Binary
//!
//! Serves the position sizing engine over HTTP.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin position-sizer
//! ```
//!
//! # Environment Variables
//!
//! - `POSITION_SIZER_CONFIG`: path to the YAML config (default: `config.yaml`, optional)
//! - `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use position_sizer::config::{CONFIG_PATH_ENV, Config, load_config};
use position_sizer::infrastructure::http::{AppState, create_router};
use position_sizer::infrastructure::metrics::init_metrics;
use position_sizer::sizing::PositionSizingEngine;
use position_sizer::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config_path = std::env::var(CONFIG_PATH_ENV).ok();
    let config = load_config(config_path.as_deref()).context("failed to load configuration")?;

    init_tracing(&config.observability)
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to initialize tracing")?;

    tracing::info!("Starting Position Sizer");
    log_config(&config);

    if config.observability.metrics_enabled {
        init_metrics().context("failed to install Prometheus recorder")?;
        tracing::info!("Prometheus metrics enabled at /metrics");
    }

    let engine = PositionSizingEngine::new(config.sizing.formula_mode);
    let state = AppState::new(
        engine,
        config.sizing.defaults.clone(),
        env!("CARGO_PKG_VERSION"),
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "HTTP server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    tracing::info!("Position Sizer stopped");
    Ok(())
}

/// Load a `.env` file if one is present.
fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn log_config(config: &Config) {
    tracing::info!(
        http_port = config.server.http_port,
        bind_address = %config.server.bind_address,
        formula_mode = config.sizing.formula_mode.as_str(),
        metrics_enabled = config.observability.metrics_enabled,
        "Configuration loaded"
    );
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
