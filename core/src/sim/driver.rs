use log::debug;
use rayon::prelude::*;

use crate::radar::config::RadarContext;
use crate::sim::detection::Detection;
use crate::telemetry::metrics::MetricsRecorder;
use crate::trajectory::flight::Flight;

/// Fixed-rate pulse grid over the simulation window.
///
/// The largest configurations reach tens of millions of pulses, so the
/// grid is never materialized; each worker iterates it independently.
#[derive(Debug, Clone)]
pub struct PulseTrain {
    start_s: f64,
    interval_s: f64,
    count: usize,
}

impl PulseTrain {
    /// Grid covering `[0, duration_s)` at `interval_s` spacing.
    pub fn over_window(duration_s: f64, interval_s: f64) -> Self {
        Self {
            start_s: 0.0,
            interval_s,
            count: (duration_s / interval_s).ceil() as usize,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Pulse times in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |i| self.start_s + i as f64 * self.interval_s)
    }
}

/// Result of one run: detections keyed by flight id plus aggregate counts
/// derived after collection.
#[derive(Debug, Clone, Default)]
pub struct SimulationOutcome {
    pub detections: Vec<(String, Vec<Detection>)>,
    pub flights_processed: usize,
    pub flights_detected: usize,
    pub total_detections: usize,
}

/// Sweeps the pulse train across one flight.
///
/// The trajectory cursor is owned here, per invocation, so flights can be
/// processed on any number of workers concurrently. Pulses with no
/// sufficiently recent state are skipped; the output stays ordered by
/// pulse time by construction.
pub fn simulate_flight(
    context: &RadarContext,
    pulses: &PulseTrain,
    flight: &Flight,
) -> Vec<Detection> {
    let rcs = context.targets.rcs(flight.category);
    let mut cursor = flight.cursor();
    let mut detections = Vec::new();

    for t in pulses.iter() {
        let Some(state) = flight.state_at(&mut cursor, t) else {
            continue;
        };
        if !context.scan.is_in_fov(t, &state.aer) {
            continue;
        }
        let snr = context.link_budget.snr(&state.ecef, rcs);
        if snr > context.min_snr_linear {
            detections.push(Detection::new(t, snr, state.clone()));
        }
    }
    detections
}

/// Evaluates every flight against the pulse train, fanning the flights
/// out across the worker pool.
///
/// Workers share only the read-only context; each owns its flight's
/// cursor and output sequence, so no locking is involved beyond the run
/// counters.
pub fn simulate(
    context: &RadarContext,
    pulses: &PulseTrain,
    flights: &[Flight],
) -> SimulationOutcome {
    let metrics = MetricsRecorder::new();
    let detections: Vec<(String, Vec<Detection>)> = flights
        .par_iter()
        .map(|flight| {
            let flight_detections = simulate_flight(context, pulses, flight);
            debug!(
                "flight {}: {} detections over {} pulses",
                flight.id,
                flight_detections.len(),
                pulses.len()
            );
            metrics.record_flight(flight_detections.len());
            (flight.id.clone(), flight_detections)
        })
        .collect();

    let counts = metrics.snapshot();
    SimulationOutcome {
        detections,
        flights_processed: counts.flights_processed,
        flights_detected: counts.flights_detected,
        total_detections: counts.detections,
    }
}
