use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::math::ellipsoid::Geodetic;
use crate::math::units::db_to_linear;
use crate::prelude::{require_finite, require_positive, ConfigError};
use crate::radar::link_budget::LinkBudget;
use crate::radar::scan::ScanGeometry;
use crate::trajectory::flight::AircraftCategory;

/// Transmitter of opportunity: a terminal surveillance radar whose pulses
/// this system listens for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransmitterParams {
    pub power_w: f64,
    pub gain_db: f64,
    pub frequency_hz: f64,
    pub pulse_width_s: f64,
}

/// Receive antenna.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AntennaParams {
    pub gain_db: f64,
}

/// Receiver front end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiverParams {
    pub noise_figure_db: f64,
    pub temperature_k: f64,
    pub bandwidth_hz: f64,
}

/// Rotation rate and angular gates of the illuminating antenna. The
/// half-beamwidths are the gate bounds themselves; `min_elevation_deg`
/// optionally rejects near-ground returns swamped by clutter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanParams {
    pub rpm: f64,
    pub horizontal_half_beamwidth_deg: f64,
    pub vertical_half_beamwidth_deg: f64,
    #[serde(default)]
    pub min_elevation_deg: Option<f64>,
}

/// Per-category radar cross sections in square meters, with an explicit
/// default so every category resolves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetCatalog {
    rcs_by_category: HashMap<AircraftCategory, f64>,
    default_rcs_m2: f64,
}

impl TargetCatalog {
    pub fn new(rcs_by_category: HashMap<AircraftCategory, f64>, default_rcs_m2: f64) -> Self {
        Self {
            rcs_by_category,
            default_rcs_m2,
        }
    }

    pub fn rcs(&self, category: AircraftCategory) -> f64 {
        self.rcs_by_category
            .get(&category)
            .copied()
            .unwrap_or(self.default_rcs_m2)
    }
}

/// Full static configuration for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarConfig {
    pub transmitter: TransmitterParams,
    pub antenna: AntennaParams,
    pub receiver: ReceiverParams,
    pub scan: ScanParams,
    pub transmitter_site: Geodetic,
    pub receiver_site: Geodetic,
    pub targets: TargetCatalog,
    pub min_snr_db: f64,
}

impl RadarConfig {
    /// Validates the physical parameters and precomputes the run context.
    ///
    /// All range and unit checks happen here, before any simulation work
    /// is scheduled.
    pub fn validate(self) -> Result<RadarContext, ConfigError> {
        require_positive("transmitter.power_w", self.transmitter.power_w)?;
        require_finite("transmitter.gain_db", self.transmitter.gain_db)?;
        require_positive("transmitter.frequency_hz", self.transmitter.frequency_hz)?;
        require_positive("transmitter.pulse_width_s", self.transmitter.pulse_width_s)?;
        require_finite("antenna.gain_db", self.antenna.gain_db)?;
        require_finite("receiver.noise_figure_db", self.receiver.noise_figure_db)?;
        require_positive("receiver.temperature_k", self.receiver.temperature_k)?;
        require_positive("receiver.bandwidth_hz", self.receiver.bandwidth_hz)?;
        require_positive("scan.rpm", self.scan.rpm)?;
        require_positive(
            "scan.horizontal_half_beamwidth_deg",
            self.scan.horizontal_half_beamwidth_deg,
        )?;
        require_positive(
            "scan.vertical_half_beamwidth_deg",
            self.scan.vertical_half_beamwidth_deg,
        )?;
        require_finite("min_snr_db", self.min_snr_db)?;
        require_positive("targets.default_rcs_m2", self.targets.default_rcs_m2)?;
        for &rcs in self.targets.rcs_by_category.values() {
            require_positive("targets.rcs_m2", rcs)?;
        }

        let scan = ScanGeometry::new(&self.scan);
        let link_budget = LinkBudget::new(
            &self.transmitter,
            &self.antenna,
            &self.receiver,
            &self.transmitter_site,
            &self.receiver_site,
        );
        Ok(RadarContext {
            scan,
            link_budget,
            targets: self.targets,
            min_snr_linear: db_to_linear(self.min_snr_db),
        })
    }
}

/// Validated, precomputed, read-only context shared by every simulation
/// worker. Built once per run, then only read.
#[derive(Debug, Clone)]
pub struct RadarContext {
    pub scan: ScanGeometry,
    pub link_budget: LinkBudget,
    pub targets: TargetCatalog,
    /// Detection threshold, converted from dB once so the hot-loop
    /// comparison is linear against linear.
    pub min_snr_linear: f64,
}
