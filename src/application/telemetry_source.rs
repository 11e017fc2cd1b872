// Source trait for the next telemetry record
use crate::application::record_generator::{advance, PerturbationProfile};
use crate::domain::telemetry::TelemetryRecord;
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Produces the record for the next tick.
///
/// The simulated source is the only implementation today; a real downlink
/// reader plugs in here without touching the buffers or the classifier.
#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// Human readable name used in logs
    fn name(&self) -> &str;

    /// Compute the record that follows `previous`
    async fn next_record(&mut self, previous: &TelemetryRecord) -> anyhow::Result<TelemetryRecord>;
}

#[derive(Debug)]
pub struct SimulatedSource {
    rng: StdRng,
    profile: PerturbationProfile,
}

impl SimulatedSource {
    pub fn new(profile: PerturbationProfile, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, profile }
    }
}

#[async_trait]
impl TelemetrySource for SimulatedSource {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn next_record(&mut self, previous: &TelemetryRecord) -> anyhow::Result<TelemetryRecord> {
        Ok(advance(previous, &self.profile, &mut self.rng))
    }
}
