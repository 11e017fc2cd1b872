// Telemetry engine - One tick of source, record, buffers and history
use crate::application::history::HistoryLog;
use crate::application::series_buffers::SeriesBufferManager;
use crate::application::telemetry_source::{SimulatedSource, TelemetrySource};
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::telemetry::TelemetryRecord;
use crate::infrastructure::config::AppConfig;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

/// Single owner of the current record and every chart window.
///
/// A tick either commits completely (record, windows and history move
/// together) or, when the source fails, leaves all state untouched.
pub struct TelemetryEngine {
    source: Box<dyn TelemetrySource>,
    record: TelemetryRecord,
    buffers: SeriesBufferManager,
    history: HistoryLog,
    tick: u64,
    captured_at: DateTime<Utc>,
}

impl TelemetryEngine {
    pub fn new(
        source: Box<dyn TelemetrySource>,
        initial: TelemetryRecord,
        buffers: SeriesBufferManager,
        mut history: HistoryLog,
    ) -> Self {
        history.append(initial.clone());
        Self {
            source,
            record: initial,
            buffers,
            history,
            tick: 0,
            captured_at: Utc::now(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let source = SimulatedSource::new(config.engine.perturbation, config.engine.seed);
        Self::new(
            Box::new(source),
            TelemetryRecord::default(),
            SeriesBufferManager::new(&config.charts, config.engine.window_capacity),
            HistoryLog::new(config.engine.history_capacity),
        )
    }

    /// Run one tick. `elapsed` is the time since the scheduler epoch and
    /// drives the chart waveforms.
    pub async fn tick_at(&mut self, elapsed: Duration) -> anyhow::Result<Arc<DashboardSnapshot>> {
        let next = self
            .source
            .next_record(&self.record)
            .await
            .with_context(|| format!("telemetry source '{}' failed", self.source.name()))?;

        if next.mission_time != self.record.mission_time + 1 {
            tracing::warn!(
                previous = self.record.mission_time,
                next = next.mission_time,
                "mission time did not advance by exactly one"
            );
        }

        self.record = next;
        self.buffers.advance(elapsed.as_secs_f64() * 1000.0);
        self.history.append(self.record.clone());
        self.tick += 1;
        self.captured_at = Utc::now();

        tracing::debug!(
            tick = self.tick,
            mission_time = self.record.mission_time,
            battery_voltage = self.record.battery_voltage,
            "telemetry tick committed"
        );

        Ok(Arc::new(self.snapshot()))
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn record(&self) -> &TelemetryRecord {
        &self.record
    }

    pub fn buffers(&self) -> &SeriesBufferManager {
        &self.buffers
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            tick: self.tick,
            captured_at: self.captured_at,
            mission_clock: self.record.mission_clock(),
            record: self.record.clone(),
            charts: self.buffers.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn seeded_engine() -> TelemetryEngine {
        let mut config = AppConfig::default();
        config.engine.seed = Some(2024);
        TelemetryEngine::from_config(&config)
    }

    struct FailingSource;

    #[async_trait]
    impl TelemetrySource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn next_record(&mut self, _previous: &TelemetryRecord) -> anyhow::Result<TelemetryRecord> {
            anyhow::bail!("downlink lost")
        }
    }

    #[tokio::test]
    async fn test_five_ticks_reach_mission_time_five() {
        let mut engine = seeded_engine();
        assert_eq!(engine.record().mission_time, 0);

        let mut last = None;
        for i in 1..=5 {
            last = Some(engine.tick_at(Duration::from_secs(i)).await.unwrap());
        }

        let snapshot = last.unwrap();
        assert_eq!(snapshot.tick, 5);
        assert_eq!(snapshot.record.mission_time, 5);
        assert_eq!(snapshot.mission_clock, "00:00:05");
        assert_eq!(engine.history().len(), 6);
    }

    #[tokio::test]
    async fn test_battery_over_thousand_ticks() {
        let mut engine = seeded_engine();
        let mut previous = engine.record().battery_voltage;
        assert_eq!(previous, 8.4);

        for i in 0..1000 {
            let snapshot = engine.tick_at(Duration::from_millis(i * 1000)).await.unwrap();
            let voltage = snapshot.record.battery_voltage;
            assert!(voltage <= previous);
            assert!((6.0..=8.4).contains(&voltage));
            previous = voltage;
        }
    }

    #[tokio::test]
    async fn test_windows_keep_capacity_across_ticks() {
        let mut engine = seeded_engine();
        let before = engine.buffers().window("altitude1.sp").unwrap().to_vec();

        let snapshot = engine.tick_at(Duration::from_secs(1)).await.unwrap();

        let after = &snapshot.chart("altitude1").unwrap().series[0].samples;
        assert_eq!(after.len(), 50);
        assert_eq!(&after[..49], &before[1..]);
    }

    #[tokio::test]
    async fn test_snapshot_reads_are_idempotent() {
        let mut engine = seeded_engine();
        engine.tick_at(Duration::from_secs(1)).await.unwrap();

        assert_eq!(engine.snapshot(), engine.snapshot());
        assert_eq!(engine.record(), engine.record());
    }

    #[tokio::test]
    async fn test_failed_source_leaves_state_untouched() {
        let config = AppConfig::default();
        let mut engine = TelemetryEngine::new(
            Box::new(FailingSource),
            TelemetryRecord::default(),
            SeriesBufferManager::new(&config.charts, 50),
            HistoryLog::new(None),
        );
        let before = engine.snapshot();

        let err = engine.tick_at(Duration::from_secs(1)).await.unwrap_err();
        assert!(err.to_string().contains("failing"));

        assert_eq!(engine.tick(), 0);
        assert_eq!(engine.record().mission_time, 0);
        assert_eq!(engine.snapshot().charts, before.charts);
        assert_eq!(engine.history().len(), 1);
    }
}
