// Application state for HTTP handlers
use crate::application::command_console::CommandConsole;
use crate::application::telemetry_engine::TelemetryEngine;
use crate::application::tick_scheduler::TickScheduler;
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::series::PixelDomain;
use crate::infrastructure::config::AppConfig;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

pub struct AppState {
    pub engine: Arc<Mutex<TelemetryEngine>>,
    pub snapshots: watch::Receiver<Arc<DashboardSnapshot>>,
    pub scheduler: Mutex<TickScheduler>,
    pub commands: Mutex<CommandConsole>,
    pub plot: PixelDomain,
}

impl AppState {
    /// Wire engine, publisher and scheduler. The scheduler is not started.
    pub fn from_config(config: &AppConfig) -> Self {
        let engine = TelemetryEngine::from_config(config);
        tracing::debug!(
            charts = config.charts.len(),
            window_capacity = engine.buffers().capacity(),
            "chart windows seeded"
        );
        let commands = CommandConsole::new(engine.record().last_command.clone());
        let (publisher, snapshots) = watch::channel(Arc::new(engine.snapshot()));
        let engine = Arc::new(Mutex::new(engine));
        let scheduler = TickScheduler::new(
            engine.clone(),
            Arc::new(publisher),
            config.engine.tick_interval(),
        );

        Self {
            engine,
            snapshots,
            scheduler: Mutex::new(scheduler),
            commands: Mutex::new(commands),
            plot: config.plot,
        }
    }

    /// Most recently published snapshot.
    pub fn latest(&self) -> Arc<DashboardSnapshot> {
        self.snapshots.borrow().clone()
    }
}
