use crate::math::angles::azimuth_separation;
use crate::math::ellipsoid::Aer;
use crate::radar::config::ScanParams;

/// Rotating-antenna scan pattern and its angular field-of-view gates.
///
/// Pure function of time and target angles plus static configuration;
/// callable from any number of workers concurrently.
#[derive(Debug, Clone)]
pub struct ScanGeometry {
    rotation_period_s: f64,
    horizontal_half_beamwidth_deg: f64,
    vertical_half_beamwidth_deg: f64,
    min_elevation_deg: Option<f64>,
}

impl ScanGeometry {
    pub fn new(params: &ScanParams) -> Self {
        Self {
            rotation_period_s: 60.0 / params.rpm,
            horizontal_half_beamwidth_deg: params.horizontal_half_beamwidth_deg,
            vertical_half_beamwidth_deg: params.vertical_half_beamwidth_deg,
            min_elevation_deg: params.min_elevation_deg,
        }
    }

    pub fn rotation_period_s(&self) -> f64 {
        self.rotation_period_s
    }

    /// Instantaneous beam azimuth: a sawtooth sweep from 0 to 360 degrees
    /// once per rotation.
    pub fn beam_azimuth_deg(&self, t: f64) -> f64 {
        (t / self.rotation_period_s).rem_euclid(1.0) * 360.0
    }

    /// Whether a target at `aer` sits inside the illuminating beam at `t`.
    ///
    /// The target cannot be above the vertical beam extent, optionally
    /// cannot be below the clutter floor, and must be within the
    /// horizontal half-beamwidth of the instantaneous beam azimuth. The
    /// azimuth comparison wraps at the 0/360 boundary.
    pub fn is_in_fov(&self, t: f64, aer: &Aer) -> bool {
        if aer.el_deg > self.vertical_half_beamwidth_deg {
            return false;
        }
        if let Some(min_el) = self.min_elevation_deg {
            if aer.el_deg < min_el {
                return false;
            }
        }
        azimuth_separation(aer.az_deg, self.beam_azimuth_deg(t))
            <= self.horizontal_half_beamwidth_deg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(min_elevation_deg: Option<f64>) -> ScanGeometry {
        ScanGeometry::new(&ScanParams {
            rpm: 12.5,
            horizontal_half_beamwidth_deg: 1.4,
            vertical_half_beamwidth_deg: 5.0,
            min_elevation_deg,
        })
    }

    fn aer(az_deg: f64, el_deg: f64) -> Aer {
        Aer {
            az_deg,
            el_deg,
            range_m: 10_000.0,
        }
    }

    #[test]
    fn beam_azimuth_sweeps_once_per_rotation() {
        let scan = geometry(None);
        let period = scan.rotation_period_s();
        assert!((period - 4.8).abs() < 1e-12);
        assert!(scan.beam_azimuth_deg(0.0).abs() < 1e-9);
        assert!((scan.beam_azimuth_deg(period / 2.0) - 180.0).abs() < 1e-9);
        // periodic in t with the rotation period
        for t in [0.3, 1.7, 3.9] {
            let diff = scan.beam_azimuth_deg(t) - scan.beam_azimuth_deg(t + period);
            assert!(diff.abs() < 1e-9, "not periodic at t={t}");
        }
    }

    #[test]
    fn fov_gate_is_periodic() {
        let scan = geometry(None);
        let period = scan.rotation_period_s();
        let target = aer(90.0, 2.0);
        let t_aligned = period / 4.0;
        assert!(scan.is_in_fov(t_aligned, &target));
        assert!(scan.is_in_fov(t_aligned + period, &target));
        assert!(scan.is_in_fov(t_aligned + 100.0 * period, &target));
    }

    #[test]
    fn azimuth_gate_wraps_at_north() {
        let scan = ScanGeometry::new(&ScanParams {
            rpm: 60.0,
            horizontal_half_beamwidth_deg: 5.0,
            vertical_half_beamwidth_deg: 5.0,
            min_elevation_deg: None,
        });
        // beam at 1 degree, target at 359: separation is 2, not 358
        let t = 1.0 / 360.0;
        assert!((scan.beam_azimuth_deg(t) - 1.0).abs() < 1e-9);
        assert!(scan.is_in_fov(t, &aer(359.0, 0.0)));
        assert!(!scan.is_in_fov(t, &aer(10.0, 0.0)));
    }

    #[test]
    fn target_above_beam_is_rejected() {
        let scan = geometry(None);
        assert!(!scan.is_in_fov(0.0, &aer(0.0, 5.1)));
        assert!(scan.is_in_fov(0.0, &aer(0.0, 4.9)));
    }

    #[test]
    fn clutter_floor_rejects_low_targets_when_configured() {
        let open = geometry(None);
        assert!(open.is_in_fov(0.0, &aer(0.0, 0.1)));
        let guarded = geometry(Some(0.5));
        assert!(!guarded.is_in_fov(0.0, &aer(0.0, 0.1)));
        assert!(guarded.is_in_fov(0.0, &aer(0.0, 0.6)));
    }
}
