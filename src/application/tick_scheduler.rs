// Tick scheduler - Periodic driver for the telemetry engine
use crate::application::telemetry_engine::TelemetryEngine;
use crate::domain::dashboard::DashboardSnapshot;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("tick scheduler is already running")]
    AlreadyRunning,
}

/// Running ticker task. Dropping it aborts the task, so the timer is released
/// even if `stop` is never reached.
struct Ticker {
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct TickScheduler {
    engine: Arc<Mutex<TelemetryEngine>>,
    publisher: Arc<watch::Sender<Arc<DashboardSnapshot>>>,
    period: Duration,
    epoch: Instant,
    ticker: Option<Ticker>,
}

impl TickScheduler {
    pub fn new(
        engine: Arc<Mutex<TelemetryEngine>>,
        publisher: Arc<watch::Sender<Arc<DashboardSnapshot>>>,
        period: Duration,
    ) -> Self {
        Self {
            engine,
            publisher,
            period,
            epoch: Instant::now(),
            ticker: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker
            .as_ref()
            .map(|t| !t.task.is_finished())
            .unwrap_or(false)
    }

    /// Spawn the ticker. The first tick fires one period from now.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = spawn_ticker(
            self.engine.clone(),
            self.publisher.clone(),
            self.period,
            self.epoch,
            shutdown_rx,
        );
        self.ticker = Some(Ticker {
            shutdown: Some(shutdown_tx),
            task,
        });

        tracing::info!(period_ms = self.period.as_millis() as u64, "tick scheduler started");
        Ok(())
    }

    /// Signal the ticker and wait for it to exit. Returns false when nothing
    /// was running.
    pub async fn stop(&mut self) -> bool {
        let Some(mut ticker) = self.ticker.take() else {
            return false;
        };

        if let Some(shutdown) = ticker.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Err(err) = (&mut ticker.task).await {
            if !err.is_cancelled() {
                tracing::error!(error = %err, "tick scheduler join error");
            }
        }

        tracing::info!("tick scheduler stopped");
        true
    }

    pub async fn restart(&mut self) -> Result<(), SchedulerError> {
        self.stop().await;
        self.start()
    }
}

fn spawn_ticker(
    engine: Arc<Mutex<TelemetryEngine>>,
    publisher: Arc<watch::Sender<Arc<DashboardSnapshot>>>,
    period: Duration,
    epoch: Instant,
    shutdown: oneshot::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let run = AssertUnwindSafe(run_ticker(engine, publisher, period, epoch, shutdown));
        if let Err(panic) = run.catch_unwind().await {
            tracing::error!(panic = panic_message(panic.as_ref()), "tick scheduler task panicked, ticking halted");
        }
    })
}

async fn run_ticker(
    engine: Arc<Mutex<TelemetryEngine>>,
    publisher: Arc<watch::Sender<Arc<DashboardSnapshot>>>,
    period: Duration,
    epoch: Instant,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = &mut shutdown => {
                tracing::debug!("tick scheduler shutdown signal received");
                break;
            }
            _ = interval.tick() => {
                let mut engine = engine.lock().await;
                let committed = engine.tick_at(epoch.elapsed()).await;
                match committed {
                    Ok(snapshot) => {
                        publisher.send_replace(snapshot);
                    }
                    Err(err) => {
                        tracing::warn!(tick = engine.tick(), error = %err, "telemetry tick skipped");
                    }
                }
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::history::HistoryLog;
    use crate::application::series_buffers::SeriesBufferManager;
    use crate::application::telemetry_source::TelemetrySource;
    use crate::domain::telemetry::TelemetryRecord;
    use crate::infrastructure::config::AppConfig;
    use async_trait::async_trait;

    struct PanickingSource;

    #[async_trait]
    impl TelemetrySource for PanickingSource {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn next_record(&mut self, _previous: &TelemetryRecord) -> anyhow::Result<TelemetryRecord> {
            panic!("source blew up")
        }
    }

    fn scheduler() -> (TickScheduler, watch::Receiver<Arc<DashboardSnapshot>>) {
        let mut config = AppConfig::default();
        config.engine.seed = Some(1);
        let engine = TelemetryEngine::from_config(&config);
        let (tx, rx) = watch::channel(Arc::new(engine.snapshot()));
        let scheduler = TickScheduler::new(
            Arc::new(Mutex::new(engine)),
            Arc::new(tx),
            Duration::from_secs(1),
        );
        (scheduler, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_publishes_one_snapshot_per_period() {
        let (mut scheduler, rx) = scheduler();
        assert_eq!(rx.borrow().record.mission_time, 0);

        scheduler.start().unwrap();
        tokio::time::sleep(Duration::from_millis(3500)).await;

        let snapshot = rx.borrow().clone();
        assert_eq!(snapshot.tick, 3);
        assert_eq!(snapshot.record.mission_time, 3);
        assert!(scheduler.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_halts_ticks() {
        let (mut scheduler, rx) = scheduler();
        scheduler.start().unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(scheduler.stop().await);
        assert!(!scheduler.is_running());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(rx.borrow().record.mission_time, 2);
        assert!(!scheduler.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_is_rejected() {
        let (mut scheduler, _rx) = scheduler();
        scheduler.start().unwrap();
        assert_eq!(scheduler.start(), Err(SchedulerError::AlreadyRunning));
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_resumes_from_retained_record() {
        let (mut scheduler, rx) = scheduler();
        scheduler.start().unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        scheduler.restart().await.unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(rx.borrow().record.mission_time, 3);
        scheduler.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_ticker() {
        let (mut scheduler, rx) = scheduler();
        scheduler.start().unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(scheduler);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(rx.borrow().record.mission_time, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_tick_ends_task_and_allows_restart() {
        let config = AppConfig::default();
        let engine = TelemetryEngine::new(
            Box::new(PanickingSource),
            TelemetryRecord::default(),
            SeriesBufferManager::new(&config.charts, config.engine.window_capacity),
            HistoryLog::new(None),
        );
        let (tx, rx) = watch::channel(Arc::new(engine.snapshot()));
        let engine = Arc::new(Mutex::new(engine));
        let mut scheduler = TickScheduler::new(engine.clone(), Arc::new(tx), Duration::from_secs(1));

        scheduler.start().unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!scheduler.is_running());
        assert_eq!(rx.borrow().tick, 0);

        // the engine lock is released by the unwind
        assert_eq!(engine.lock().await.tick(), 0);
        assert!(scheduler.stop().await);
        scheduler.start().unwrap();
        scheduler.stop().await;
    }
}
