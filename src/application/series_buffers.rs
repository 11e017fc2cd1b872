// Series buffer manager - Rolling chart windows advanced once per tick
use crate::domain::dashboard::{ChartCategory, ChartSnapshot, SeriesSnapshot};
use crate::domain::series::SeriesWindow;
use crate::infrastructure::config::ChartConfig;
use serde::Deserialize;

/// Synthetic waveform for one chart trace.
///
/// Live samples follow `base - decay*t + amplitude*sin(freq*t + phase)` with
/// `t` in milliseconds; the initial window uses the same shape over the sample
/// index with `seed_slope` and `seed_freq`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TraceProfile {
    pub base: f64,
    pub amplitude: f64,
    #[serde(default)]
    pub phase: f64,
    #[serde(default)]
    pub seed_slope: f64,
    pub seed_freq: f64,
    #[serde(default)]
    pub decay: f64,
    pub freq: f64,
}

impl TraceProfile {
    pub fn seed(&self, index: usize) -> f64 {
        let i = index as f64;
        self.base - self.seed_slope * i + self.amplitude * (self.seed_freq * i + self.phase).sin()
    }

    pub fn sample(&self, elapsed_ms: f64) -> f64 {
        self.base - self.decay * elapsed_ms
            + self.amplitude * (self.freq * elapsed_ms + self.phase).sin()
    }
}

#[derive(Debug, Clone)]
struct SeriesBuffer {
    id: String,
    name: String,
    color: Option<String>,
    trace: TraceProfile,
    window: SeriesWindow,
}

#[derive(Debug, Clone)]
struct ChartBuffer {
    id: String,
    title: String,
    category: ChartCategory,
    max_value: f64,
    series: Vec<SeriesBuffer>,
}

/// Owns every chart window. Only the engine mutates it.
#[derive(Debug, Clone)]
pub struct SeriesBufferManager {
    charts: Vec<ChartBuffer>,
    capacity: usize,
}

impl SeriesBufferManager {
    pub fn new(charts: &[ChartConfig], capacity: usize) -> Self {
        let charts = charts
            .iter()
            .map(|chart| ChartBuffer {
                id: chart.id.clone(),
                title: chart.title.clone(),
                category: chart.category,
                max_value: chart.max_value(),
                series: chart
                    .series
                    .iter()
                    .map(|s| SeriesBuffer {
                        id: s.id.clone(),
                        name: s.name.clone(),
                        color: s.color.clone(),
                        trace: s.trace,
                        window: SeriesWindow::from_fn(capacity, |i| s.trace.seed(i)),
                    })
                    .collect(),
            })
            .collect();

        Self { charts, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append one sample per series for the given elapsed time.
    pub fn advance(&mut self, elapsed_ms: f64) {
        for chart in &mut self.charts {
            for series in &mut chart.series {
                series.window.push(series.trace.sample(elapsed_ms));
            }
        }
    }

    pub fn window(&self, series_id: &str) -> Option<&SeriesWindow> {
        self.charts
            .iter()
            .flat_map(|c| c.series.iter())
            .find(|s| s.id == series_id)
            .map(|s| &s.window)
    }

    pub fn snapshot(&self) -> Vec<ChartSnapshot> {
        self.charts
            .iter()
            .map(|chart| ChartSnapshot {
                id: chart.id.clone(),
                title: chart.title.clone(),
                category: chart.category,
                max_value: chart.max_value,
                series: chart
                    .series
                    .iter()
                    .map(|s| SeriesSnapshot {
                        id: s.id.clone(),
                        name: s.name.clone(),
                        color: s.color.clone(),
                        samples: s.window.to_vec(),
                    })
                    .collect(),
            })
            .collect()
    }
}
