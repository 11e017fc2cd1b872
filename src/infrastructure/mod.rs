// Infrastructure layer - Configuration, export and streaming adapters
pub mod config;
pub mod csv_export;
pub mod event_stream;
