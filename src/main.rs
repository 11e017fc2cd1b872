// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::infrastructure::config::load_app_config;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    alarm_panel, chart_path, export_charts_csv, export_history_csv, get_command, health_check,
    latest_telemetry, reset_command, start_scheduler, stop_scheduler, stream_telemetry,
    submit_command,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("failed to load configuration")?;

    // Engine, publisher and scheduler (application layer)
    let state = Arc::new(AppState::from_config(&config));
    state.scheduler.lock().await.start()?;

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/telemetry", get(latest_telemetry))
        .route("/telemetry/stream", get(stream_telemetry))
        .route("/alarms", get(alarm_panel))
        .route("/charts/:id/path", get(chart_path))
        .route("/export/history.csv", get(export_history_csv))
        .route("/export/charts.csv", get(export_charts_csv))
        .route("/command", get(get_command).post(submit_command))
        .route("/command/reset", post(reset_command))
        .route("/scheduler/start", post(start_scheduler))
        .route("/scheduler/stop", post(stop_scheduler))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind_addr))?;
    tracing::info!(%addr, charts = config.charts.len(), "starting ground station telemetry service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the timer before exit
    state.scheduler.lock().await.stop().await;
    tracing::info!("ground station telemetry service stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
