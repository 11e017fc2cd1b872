// Dashboard snapshot domain model
use super::status::StatusReading;
use super::telemetry::TelemetryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartCategory {
    Altitude,
    DescentRate,
}

impl ChartCategory {
    /// Full-scale value used when mapping samples to pixels.
    pub fn default_max_value(&self) -> f64 {
        match self {
            ChartCategory::Altitude => 600.0,
            ChartCategory::DescentRate => 25.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSnapshot {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub samples: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSnapshot {
    pub id: String,
    pub title: String,
    pub category: ChartCategory,
    pub max_value: f64,
    pub series: Vec<SeriesSnapshot>,
}

/// Everything a renderer needs for one frame. Published once per tick and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub tick: u64,
    pub captured_at: DateTime<Utc>,
    pub mission_clock: String,
    pub record: TelemetryRecord,
    pub charts: Vec<ChartSnapshot>,
}

impl DashboardSnapshot {
    pub fn chart(&self, id: &str) -> Option<&ChartSnapshot> {
        self.charts.iter().find(|c| c.id == id)
    }
}

/// Interface Alarm Status console view of a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlarmPanel {
    pub error_code: String,
    pub parameters: Vec<StatusReading>,
    pub overall: StatusReading,
    pub connection: StatusReading,
    pub filter: StatusReading,
    pub camera: StatusReading,
    pub filter_mechanism: StatusReading,
}

impl AlarmPanel {
    pub fn from_record(record: &TelemetryRecord) -> Self {
        let parameters = record
            .fault_parameters()
            .iter()
            .enumerate()
            .map(|(i, (label, status))| StatusReading::new(format!("{} {}", i + 1, label), status))
            .collect();

        Self {
            error_code: record.error_code.clone(),
            parameters,
            overall: StatusReading::new("Status", &record.overall_status),
            connection: StatusReading::new("Connection", &record.connection_status),
            filter: StatusReading::new("Filter", &record.filter_status),
            camera: StatusReading::new("Camera Status", &record.camera_status),
            filter_mechanism: StatusReading::new("Filter Mechanism", &record.filter_mechanism),
        }
    }
}
