use anyhow::Context;
use bprcore::math::ellipsoid::Geodetic;
use bprcore::radar::config::{
    AntennaParams, RadarConfig, ReceiverParams, ScanParams, TargetCatalog, TransmitterParams,
};
use bprcore::trajectory::flight::AircraftCategory;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One YAML document holding the radar catalogs and the simulation
/// window. Partial files are allowed; unspecified sections fall back to
/// the terminal-surveillance-radar defaults below.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Simulation window in seconds.
    pub duration_s: f64,
    /// Pulse repetition interval in seconds.
    pub pulse_interval_s: f64,
    /// Unix timestamp of the simulation epoch; recorded trajectory times
    /// are rebased against it.
    pub epoch_unix: f64,
    /// Ingester-produced trajectory file. Optional because offline runs
    /// generate their own flights.
    pub flights_path: Option<PathBuf>,
    pub min_snr_db: f64,
    pub transmitter: TransmitterParams,
    pub antenna: AntennaParams,
    pub receiver: ReceiverParams,
    pub scan: ScanParams,
    pub transmitter_site: Geodetic,
    pub receiver_site: Geodetic,
    pub target_rcs_m2: HashMap<AircraftCategory, f64>,
    pub default_rcs_m2: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        let mut target_rcs_m2 = HashMap::new();
        target_rcs_m2.insert(AircraftCategory::A1, 2.0);
        target_rcs_m2.insert(AircraftCategory::A2, 5.0);
        target_rcs_m2.insert(AircraftCategory::A3, 10.0);
        target_rcs_m2.insert(AircraftCategory::A4, 20.0);
        target_rcs_m2.insert(AircraftCategory::A5, 40.0);
        Self {
            duration_s: 24.0 * 60.0 * 60.0,
            pulse_interval_s: 1.0e-2,
            epoch_unix: 1_740_787_200.0, // 2025-03-01T00:00:00Z
            flights_path: None,
            min_snr_db: 5.0,
            transmitter: TransmitterParams {
                power_w: 25_000.0,
                gain_db: 34.0,
                frequency_hz: 2.8e9,
                pulse_width_s: 1.0e-6,
            },
            antenna: AntennaParams { gain_db: 2.15 },
            receiver: ReceiverParams {
                noise_figure_db: 3.5,
                temperature_k: 290.0,
                bandwidth_hz: 4.0e6,
            },
            scan: ScanParams {
                rpm: 12.5,
                horizontal_half_beamwidth_deg: 1.4,
                vertical_half_beamwidth_deg: 5.0,
                min_elevation_deg: None,
            },
            transmitter_site: Geodetic::new(34.052724, -117.596634, 282.0),
            receiver_site: Geodetic::new(34.063, -117.438, 420.0),
            target_rcs_m2,
            default_rcs_m2: 2.0,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_radar_config(&self) -> RadarConfig {
        RadarConfig {
            transmitter: self.transmitter.clone(),
            antenna: self.antenna.clone(),
            receiver: self.receiver.clone(),
            scan: self.scan.clone(),
            transmitter_site: self.transmitter_site,
            receiver_site: self.receiver_site,
            targets: TargetCatalog::new(self.target_rcs_m2.clone(), self.default_rcs_m2),
            min_snr_db: self.min_snr_db,
        }
    }
}
