// HTTP request handlers
use crate::application::command_console::{CommandConsole, CommandEntry};
use crate::domain::dashboard::{AlarmPanel, DashboardSnapshot};
use crate::domain::series::{svg_path_data, to_pixel_path, PixelPoint};
use crate::infrastructure::csv_export::{charts_to_csv, history_to_csv, ExportError};
use crate::infrastructure::event_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

#[derive(Debug, Serialize)]
pub struct SeriesPath {
    pub id: String,
    pub color: Option<String>,
    pub path: String,
    pub points: Vec<PixelPoint>,
}

#[derive(Debug, Serialize)]
pub struct ChartPathResponse {
    pub id: String,
    pub title: String,
    pub max_value: f64,
    pub series: Vec<SeriesPath>,
}

#[derive(Debug, Serialize)]
pub struct SchedulerStatus {
    pub running: bool,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Latest published snapshot
pub async fn latest_telemetry(State(state): State<Arc<AppState>>) -> Json<DashboardSnapshot> {
    Json(state.latest().as_ref().clone())
}

/// Live snapshot feed, one event per tick
pub async fn stream_telemetry(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    stream_from_receiver(state.snapshots.clone())
}

/// Interface alarm status console for the latest record
pub async fn alarm_panel(State(state): State<Arc<AppState>>) -> Json<AlarmPanel> {
    Json(AlarmPanel::from_record(&state.latest().record))
}

/// Pixel coordinates and SVG path data for every trace of one chart
pub async fn chart_path(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ChartPathResponse>, StatusCode> {
    let snapshot = state.latest();
    let chart = snapshot.chart(&id).ok_or(StatusCode::NOT_FOUND)?;

    let series = chart
        .series
        .iter()
        .map(|s| {
            let points = to_pixel_path(&s.samples, chart.max_value, state.plot);
            SeriesPath {
                id: s.id.clone(),
                color: s.color.clone(),
                path: svg_path_data(&points),
                points,
            }
        })
        .collect();

    Ok(Json(ChartPathResponse {
        id: chart.id.clone(),
        title: chart.title.clone(),
        max_value: chart.max_value,
        series,
    }))
}

/// Full history as CSV
pub async fn export_history_csv(State(state): State<Arc<AppState>>) -> Response {
    let exported = {
        let engine = state.engine.lock().await;
        let history = engine.history();
        tracing::debug!(
            rows = history.len(),
            dropped = history.dropped(),
            "exporting telemetry history"
        );
        history_to_csv(history)
    };
    csv_response(exported, "telemetry_history.csv")
}

/// Current chart windows as CSV
pub async fn export_charts_csv(State(state): State<Arc<AppState>>) -> Response {
    csv_response(charts_to_csv(&state.latest().charts), "telemetry_charts.csv")
}

fn csv_response(exported: Result<String, ExportError>, filename: &str) -> Response {
    match exported {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, filename, "csv export failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Current operator command and the most recent submissions
pub async fn get_command(State(state): State<Arc<AppState>>) -> Json<CommandConsole> {
    Json(state.commands.lock().await.clone())
}

/// Record an operator command. It is displayed, not executed.
pub async fn submit_command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> (StatusCode, Json<CommandEntry>) {
    let mut commands = state.commands.lock().await;
    let entry = commands.submit(&request.command).clone();
    (StatusCode::ACCEPTED, Json(entry))
}

pub async fn reset_command(State(state): State<Arc<AppState>>) -> Json<CommandConsole> {
    let mut commands = state.commands.lock().await;
    commands.reset();
    Json(commands.clone())
}

pub async fn start_scheduler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SchedulerStatus>, (StatusCode, String)> {
    let mut scheduler = state.scheduler.lock().await;
    scheduler
        .start()
        .map_err(|e| (StatusCode::CONFLICT, e.to_string()))?;
    Ok(Json(SchedulerStatus { running: true }))
}

pub async fn stop_scheduler(State(state): State<Arc<AppState>>) -> Json<SchedulerStatus> {
    let mut scheduler = state.scheduler.lock().await;
    scheduler.stop().await;
    Json(SchedulerStatus {
        running: scheduler.is_running(),
    })
}
