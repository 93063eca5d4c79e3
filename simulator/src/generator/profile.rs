use anyhow::ensure;
use bprcore::math::ellipsoid::{ecef_to_aer, geodetic_to_ecef, Geodetic};
use bprcore::math::units::feet_to_meters;
use bprcore::trajectory::flight::{AircraftCategory, Flight};
use bprcore::trajectory::state::FlightState;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Rough meters per degree of latitude; close enough for synthetic
/// tracks a few tens of kilometers across.
const METERS_PER_DEG_LAT: f64 = 111_320.0;

/// Configuration for generating synthetic orbiting trajectories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub flight_count: usize,
    pub duration_s: f64,
    /// Spacing between samples, matching the ~1 Hz broadcast cadence.
    pub sample_interval_s: f64,
    /// Observation point the orbits are centered on.
    pub center: Geodetic,
    pub radius_m: f64,
    pub altitude_ft: f64,
    pub altitude_jitter_ft: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            flight_count: 4,
            duration_s: 300.0,
            sample_interval_s: 1.0,
            center: Geodetic::new(34.063, -117.438, 420.0),
            radius_m: 10_000.0,
            altitude_ft: 6_500.0,
            altitude_jitter_ft: 50.0,
            seed: 0,
        }
    }
}

/// Builds `flight_count` aircraft flying one full circle around the
/// center over the configured window, with seeded altitude jitter so
/// runs are repeatable.
pub fn build_synthetic_flights(config: &GeneratorConfig) -> anyhow::Result<Vec<Flight>> {
    ensure!(config.flight_count > 0, "generator needs at least one flight");
    ensure!(
        config.duration_s > 0.0 && config.sample_interval_s > 0.0,
        "generator window and sample interval must be positive"
    );
    ensure!(config.radius_m > 0.0, "generator orbit radius must be positive");
    ensure!(
        config.altitude_jitter_ft >= 0.0,
        "generator altitude jitter must not be negative"
    );

    let sample_count = (config.duration_s / config.sample_interval_s).ceil() as usize;
    let meters_per_deg_lon = METERS_PER_DEG_LAT * config.center.lat_deg.to_radians().cos();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut flights = Vec::with_capacity(config.flight_count);
    for flight_index in 0..config.flight_count {
        let phase = flight_index as f64 / config.flight_count as f64 * TAU;
        let category = if flight_index % 2 == 0 {
            AircraftCategory::A3
        } else {
            AircraftCategory::A1
        };

        let mut states = Vec::with_capacity(sample_count);
        for sample in 0..sample_count {
            let t = sample as f64 * config.sample_interval_s;
            let angle = phase + t / config.duration_s * TAU;
            let east = config.radius_m * angle.sin();
            let north = config.radius_m * angle.cos();
            let lat_deg = config.center.lat_deg + north / METERS_PER_DEG_LAT;
            let lon_deg = config.center.lon_deg + east / meters_per_deg_lon;
            let jitter = if config.altitude_jitter_ft > 0.0 {
                rng.gen_range(-config.altitude_jitter_ft..config.altitude_jitter_ft)
            } else {
                0.0
            };
            let alt_ft = config.altitude_ft + jitter;

            let ecef = geodetic_to_ecef(&Geodetic::new(lat_deg, lon_deg, feet_to_meters(alt_ft)));
            let aer = ecef_to_aer(&ecef, &config.center);
            states.push(FlightState::new(t, lat_deg, lon_deg, alt_ft, aer));
        }
        flights.push(Flight::new(format!("sim{flight_index:03x}"), category, states));
    }
    Ok(flights)
}
