// Record generator - Bounded random walk over the previous telemetry record
use crate::domain::telemetry::TelemetryRecord;
use rand::Rng;
use serde::Deserialize;

/// Step sizes for the simulated random walk.
///
/// Each perturbed field moves by `uniform(-k/2, k/2)` per tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PerturbationProfile {
    pub temperature_step: f64,
    pub pitch_step: f64,
    pub roll_step: f64,
    pub yaw_step: f64,
    pub battery_drain_max: f64,
    pub battery_floor: f64,
}

impl Default for PerturbationProfile {
    fn default() -> Self {
        Self {
            temperature_step: 0.2,
            pitch_step: 1.0,
            roll_step: 0.5,
            yaw_step: 2.0,
            battery_drain_max: 0.01,
            battery_floor: 6.0,
        }
    }
}

/// Produce the next record from `previous`.
///
/// Mission time advances by one, temperatures and attitude take a random
/// step, the battery drains towards its floor. Every other field is carried
/// over unchanged.
pub fn advance<R: Rng>(
    previous: &TelemetryRecord,
    profile: &PerturbationProfile,
    rng: &mut R,
) -> TelemetryRecord {
    TelemetryRecord {
        mission_time: previous.mission_time + 1,
        station1_temp: previous.station1_temp + jitter(rng, profile.temperature_step),
        station2_temp: previous.station2_temp + jitter(rng, profile.temperature_step),
        pitch: previous.pitch + jitter(rng, profile.pitch_step),
        roll: previous.roll + jitter(rng, profile.roll_step),
        yaw: previous.yaw + jitter(rng, profile.yaw_step),
        battery_voltage: drain(rng, previous.battery_voltage, profile),
        ..previous.clone()
    }
}

fn jitter<R: Rng>(rng: &mut R, step: f64) -> f64 {
    if step <= 0.0 {
        return 0.0;
    }
    let half = step / 2.0;
    rng.gen_range(-half..half)
}

// Never raises the voltage, even when it already sits below the floor.
fn drain<R: Rng>(rng: &mut R, voltage: f64, profile: &PerturbationProfile) -> f64 {
    let loss = if profile.battery_drain_max > 0.0 {
        rng.gen_range(0.0..profile.battery_drain_max)
    } else {
        0.0
    };
    (voltage - loss).max(profile.battery_floor).min(voltage)
}
