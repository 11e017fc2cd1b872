use crate::application::record_generator::PerturbationProfile;
use crate::application::series_buffers::TraceProfile;
use crate::domain::dashboard::ChartCategory;
use crate::domain::series::PixelDomain;
use serde::Deserialize;
use std::f64::consts::FRAC_PI_2;
use std::time::Duration;

const ORANGE: &str = "#F97316";
const BLUE: &str = "#3B82F6";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub engine: EngineSettings,
    pub plot: PixelDomain,
    pub charts: Vec<ChartConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            engine: EngineSettings::default(),
            plot: PixelDomain::default(),
            charts: default_charts(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineSettings {
    pub tick_interval_ms: u64,
    pub window_capacity: usize,
    pub seed: Option<u64>,
    /// Unbounded when absent.
    pub history_capacity: Option<usize>,
    pub perturbation: PerturbationProfile,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            window_capacity: 50,
            seed: None,
            history_capacity: None,
            perturbation: PerturbationProfile::default(),
        }
    }
}

impl EngineSettings {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub category: ChartCategory,
    pub max_value: Option<f64>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

impl ChartConfig {
    pub fn max_value(&self) -> f64 {
        self.max_value
            .unwrap_or_else(|| self.category.default_max_value())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub trace: TraceProfile,
}

/// Load configuration from `config/ground_station.*` (optional) and
/// `GROUND_STATION__*` environment variables on top of built-in defaults.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/ground_station").required(false))
        .add_source(
            config::Environment::with_prefix("GROUND_STATION")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = settings.try_deserialize()?;
    app_config.validate()?;
    Ok(app_config)
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.engine.tick_interval_ms > 0, "engine.tick_interval_ms must be > 0");
        anyhow::ensure!(self.engine.window_capacity > 0, "engine.window_capacity must be > 0");
        anyhow::ensure!(
            self.engine.history_capacity != Some(0),
            "engine.history_capacity must be > 0 when set"
        );
        let perturbation = &self.engine.perturbation;
        for (name, step) in [
            ("temperature_step", perturbation.temperature_step),
            ("pitch_step", perturbation.pitch_step),
            ("roll_step", perturbation.roll_step),
            ("yaw_step", perturbation.yaw_step),
            ("battery_drain_max", perturbation.battery_drain_max),
        ] {
            anyhow::ensure!(
                step.is_finite() && step >= 0.0,
                "engine.perturbation.{} must be finite and >= 0, got {}",
                name,
                step
            );
        }
        anyhow::ensure!(
            perturbation.battery_floor.is_finite(),
            "engine.perturbation.battery_floor must be finite"
        );
        anyhow::ensure!(self.plot.width > 0.0 && self.plot.height > 0.0, "plot size must be positive");
        anyhow::ensure!(!self.charts.is_empty(), "at least one chart must be configured");
        for chart in &self.charts {
            anyhow::ensure!(
                chart.max_value() > 0.0,
                "chart {} must have a positive max_value",
                chart.id
            );
        }
        Ok(())
    }
}

/// The four chart pairs of the ground station layout.
pub fn default_charts() -> Vec<ChartConfig> {
    vec![
        altitude_chart("altitude1", 0.1, 0.0001, 10.0, 0.08, 0.00008, 8.0),
        altitude_chart("altitude2", 0.12, 0.00012, 12.0, 0.09, 0.00009, 9.0),
        descent_chart("descentRate1", 0.3, 0.003, 0.25, 0.0025, 1.0),
        descent_chart("descentRate2", 0.28, 0.0028, 0.22, 0.0022, 1.5),
    ]
}

fn altitude_chart(
    id: &str,
    sp_seed_freq: f64,
    sp_freq: f64,
    sp_amplitude: f64,
    c_seed_freq: f64,
    c_freq: f64,
    c_amplitude: f64,
) -> ChartConfig {
    ChartConfig {
        id: id.to_string(),
        title: "Altitude".to_string(),
        category: ChartCategory::Altitude,
        max_value: None,
        series: vec![
            series(id, "sp", "Altitude SP", ORANGE, TraceProfile {
                base: 520.0,
                amplitude: sp_amplitude,
                phase: 0.0,
                seed_slope: 2.0,
                seed_freq: sp_seed_freq,
                decay: 0.001,
                freq: sp_freq,
            }),
            series(id, "c", "Altitude C", BLUE, TraceProfile {
                base: 500.0,
                amplitude: c_amplitude,
                phase: FRAC_PI_2,
                seed_slope: 1.8,
                seed_freq: c_seed_freq,
                decay: 0.0008,
                freq: c_freq,
            }),
        ],
    }
}

fn descent_chart(
    id: &str,
    sp_seed_freq: f64,
    sp_freq: f64,
    c_seed_freq: f64,
    c_freq: f64,
    c_phase: f64,
) -> ChartConfig {
    ChartConfig {
        id: id.to_string(),
        title: "Descent Rate".to_string(),
        category: ChartCategory::DescentRate,
        max_value: None,
        series: vec![
            series(id, "sp", "Descent Rate SP", ORANGE, TraceProfile {
                base: 12.0,
                amplitude: 8.0,
                phase: 0.0,
                seed_slope: 0.0,
                seed_freq: sp_seed_freq,
                decay: 0.0,
                freq: sp_freq,
            }),
            series(id, "c", "Descent Rate C", BLUE, TraceProfile {
                base: 10.0,
                amplitude: 6.0,
                phase: c_phase,
                seed_slope: 0.0,
                seed_freq: c_seed_freq,
                decay: 0.0,
                freq: c_freq,
            }),
        ],
    }
}

fn series(chart_id: &str, suffix: &str, name: &str, color: &str, trace: TraceProfile) -> SeriesConfig {
    SeriesConfig {
        id: format!("{}.{}", chart_id, suffix),
        name: name.to_string(),
        color: Some(color.to_string()),
        trace,
    }
}
