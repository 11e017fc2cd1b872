// Application layer - Tick engine, scheduling and operator use cases
pub mod command_console;
pub mod history;
pub mod record_generator;
pub mod series_buffers;
pub mod telemetry_engine;
pub mod telemetry_source;
pub mod tick_scheduler;
