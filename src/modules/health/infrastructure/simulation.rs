//! Synthetic pulse feed for running the monitor without a real device
//!
//! Ingests a bounded random-walk heart rate into the simulated store on a
//! fixed interval. Each ingest fires the store's observer notifications, so
//! the full observe-then-fetch pipeline runs exactly as it would against
//! live hardware.

use rand::Rng;
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::modules::health::domain::QuantitySample;
use crate::modules::health::infrastructure::simulated_store::SimulatedHealthStore;
use crate::{log_debug, log_info};

const MIN_BPM: f64 = 40.0;
const MAX_BPM: f64 = 185.0;

/// Tuning for the synthetic pulse
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub interval: Duration,
    pub base_bpm: f64,
    pub max_step_bpm: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1), // One sample per second
            base_bpm: 72.0,                   // Resting adult heart rate
            max_step_bpm: 4.0,                // Largest per-tick drift
        }
    }
}

impl SimulationConfig {
    /// Environment overrides with parse-or-default semantics
    ///
    /// Reads `PULSEWATCH_SIM_INTERVAL_MS`, `PULSEWATCH_SIM_BASE_BPM` and
    /// `PULSEWATCH_SIM_MAX_STEP`. Unset, unparsable or degenerate values keep
    /// defaults: the interval must be positive, the base finite, the step
    /// positive and finite. A zero interval or an empty step range would
    /// panic the feed task on its first tick.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let interval = env::var("PULSEWATCH_SIM_INTERVAL_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|millis| *millis > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.interval);
        let base_bpm = env::var("PULSEWATCH_SIM_BASE_BPM")
            .ok()
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|bpm| bpm.is_finite())
            .unwrap_or(defaults.base_bpm);
        let max_step_bpm = env::var("PULSEWATCH_SIM_MAX_STEP")
            .ok()
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|step| step.is_finite() && *step > 0.0)
            .unwrap_or(defaults.max_step_bpm);

        Self {
            interval,
            base_bpm,
            max_step_bpm,
        }
    }
}

/// Background task that writes the synthetic heart rate into the store
pub struct PulseSimulator;

impl PulseSimulator {
    /// Start the feed; it runs until `token` is cancelled
    pub fn spawn(
        store: Arc<SimulatedHealthStore>,
        config: SimulationConfig,
        token: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            log_info!(
                "Pulse simulator started (base {:.0} bpm, every {:?})",
                config.base_bpm,
                config.interval
            );

            let mut interval = tokio::time::interval(config.interval);
            let mut bpm = config.base_bpm;

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        log_info!("Pulse simulator stopped");
                        break;
                    }
                    _ = interval.tick() => {
                        let step = rand::thread_rng()
                            .gen_range(-config.max_step_bpm..=config.max_step_bpm);
                        bpm = (bpm + step).clamp(MIN_BPM, MAX_BPM);
                        log_debug!("Simulated pulse: {:.1} bpm", bpm);
                        store.ingest(QuantitySample::heart_rate(bpm, chrono::Utc::now()));
                    }
                }
            }
        })
    }
}
