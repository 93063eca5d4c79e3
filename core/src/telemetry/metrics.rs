use std::sync::Mutex;

/// Run counters shared across simulation workers.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

struct Metrics {
    flights_processed: usize,
    flights_detected: usize,
    detections: usize,
}

/// Point-in-time copy of the counters for end-of-run reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub flights_processed: usize,
    pub flights_detected: usize,
    pub detections: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                flights_processed: 0,
                flights_detected: 0,
                detections: 0,
            }),
        }
    }

    /// Records one completed flight and its detection count.
    pub fn record_flight(&self, detections: usize) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.flights_processed += 1;
            if detections > 0 {
                metrics.flights_detected += 1;
            }
            metrics.detections += detections;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                flights_processed: metrics.flights_processed,
                flights_detected: metrics.flights_detected,
                detections: metrics.detections,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
