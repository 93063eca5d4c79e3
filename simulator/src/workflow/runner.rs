use crate::generator::profile::{build_synthetic_flights, GeneratorConfig};
use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use bprcore::math::units::linear_to_db;
use bprcore::sim::detection::Detection;
use bprcore::sim::driver::{simulate, PulseTrain};
use bprcore::trajectory::flight::Flight;
use bprcore::trajectory::loader::load_flights;
use log::info;
use std::fs::File;
use std::io::BufReader;

/// End-of-run report: aggregate counts plus the per-flight detection
/// sequences.
pub struct RunSummary {
    pub flights_processed: usize,
    pub flights_detected: usize,
    pub total_detections: usize,
    pub detections: Vec<(String, Vec<Detection>)>,
}

impl RunSummary {
    /// One line per detected flight, up to `limit` lines.
    pub fn headline_lines(&self, limit: usize) -> Vec<String> {
        self.detections
            .iter()
            .filter(|(_, detections)| !detections.is_empty())
            .take(limit)
            .map(|(id, detections)| {
                let first = &detections[0];
                format!(
                    "target {} detected {} times, first at t={:.2}s snr={:.1}dB",
                    id,
                    detections.len(),
                    first.t,
                    linear_to_db(first.snr)
                )
            })
            .collect()
    }
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    /// Runs against the recorded trajectory file named by the config.
    pub fn execute(&self) -> anyhow::Result<RunSummary> {
        let path = self
            .config
            .flights_path
            .as_ref()
            .context("no trajectory file configured; pass --flights or use --offline")?;
        let file = File::open(path)
            .with_context(|| format!("opening trajectory file {}", path.display()))?;
        let flights = load_flights(BufReader::new(file), self.config.epoch_unix)
            .context("loading trajectory data")?;
        info!("loaded {} flights from {}", flights.len(), path.display());
        self.run(flights)
    }

    /// Runs the built-in synthetic fly-by scenario.
    pub fn execute_offline(&self) -> anyhow::Result<RunSummary> {
        let generator = GeneratorConfig {
            center: self.config.receiver_site,
            duration_s: self.config.duration_s.min(600.0),
            ..GeneratorConfig::default()
        };
        let flights = build_synthetic_flights(&generator)?;
        self.run(flights)
    }

    fn run(&self, flights: Vec<Flight>) -> anyhow::Result<RunSummary> {
        let context = self
            .config
            .to_radar_config()
            .validate()
            .context("validating radar configuration")?;
        info!(
            "direct-path elevation {:.3} deg, noise floor {:.2} dBm",
            context.link_budget.direct_path_elevation_deg(),
            linear_to_db(context.link_budget.noise_floor()) + 30.0
        );

        let pulses = PulseTrain::over_window(self.config.duration_s, self.config.pulse_interval_s);
        info!(
            "sweeping {} pulses across {} flights",
            pulses.len(),
            flights.len()
        );

        let outcome = simulate(&context, &pulses, &flights);
        info!(
            "processed {} flights, {} with detections, {} detections total",
            outcome.flights_processed, outcome.flights_detected, outcome.total_detections
        );

        Ok(RunSummary {
            flights_processed: outcome.flights_processed,
            flights_detected: outcome.flights_detected,
            total_detections: outcome.total_detections,
            detections: outcome.detections,
        })
    }
}
