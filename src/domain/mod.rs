// Domain layer - Telemetry records, sample windows and status taxonomy
pub mod dashboard;
pub mod series;
pub mod status;
pub mod telemetry;
