use std::f64::consts::PI;

use nalgebra::Vector3;

use crate::math::ellipsoid::{ecef_to_enu, geodetic_to_ecef, Geodetic};
use crate::math::units::{db_to_linear, linear_to_db};
use crate::radar::config::{AntennaParams, ReceiverParams, TransmitterParams};

/// Boltzmann constant in J/K.
pub const BOLTZMANN: f64 = 1.380_649e-23;
/// Speed of light in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Precomputed constants of the bistatic radar equation.
///
/// Free-space form only: the propagation-pattern and system-loss terms
/// are skipped, so the received power depends on range solely through the
/// inverse-square term of each leg.
#[derive(Debug, Clone)]
pub struct LinkBudget {
    transmitter_ecef: Vector3<f64>,
    receiver_ecef: Vector3<f64>,
    power_scalar: f64,
    noise_floor: f64,
    wavelength_m: f64,
    direct_path_elevation_deg: f64,
}

impl LinkBudget {
    pub fn new(
        transmitter: &TransmitterParams,
        antenna: &AntennaParams,
        receiver: &ReceiverParams,
        transmitter_site: &Geodetic,
        receiver_site: &Geodetic,
    ) -> Self {
        let wavelength_m = SPEED_OF_LIGHT / transmitter.frequency_hz;
        let gt = db_to_linear(transmitter.gain_db);
        let gr = db_to_linear(antenna.gain_db);
        let power_scalar =
            (transmitter.power_w * gt * gr * wavelength_m * wavelength_m) / (4.0 * PI).powi(3);

        // Minimum-detectable-signal form: kT summed with the noise figure
        // and bandwidth in dB space.
        let noise_floor = db_to_linear(
            linear_to_db(BOLTZMANN * receiver.temperature_k)
                + receiver.noise_figure_db
                + linear_to_db(receiver.bandwidth_hz),
        );

        let transmitter_ecef = geodetic_to_ecef(transmitter_site);
        let receiver_ecef = geodetic_to_ecef(receiver_site);
        let enu = ecef_to_enu(&transmitter_ecef, receiver_site);
        let horizontal = (enu.x * enu.x + enu.y * enu.y).sqrt();
        let direct_path_elevation_deg = enu.z.atan2(horizontal).to_degrees();

        Self {
            transmitter_ecef,
            receiver_ecef,
            power_scalar,
            noise_floor,
            wavelength_m,
            direct_path_elevation_deg,
        }
    }

    pub fn wavelength_m(&self) -> f64 {
        self.wavelength_m
    }

    pub fn noise_floor(&self) -> f64 {
        self.noise_floor
    }

    /// Elevation angle of the transmitter as seen from the receiver site.
    /// Judges whether the receiver can also hear the direct pulse it
    /// synchronizes on.
    pub fn direct_path_elevation_deg(&self) -> f64 {
        self.direct_path_elevation_deg
    }

    /// Transmitter-to-target and target-to-receiver distances in meters.
    pub fn bistatic_ranges(&self, target_ecef: &Vector3<f64>) -> (f64, f64) {
        (
            (target_ecef - self.transmitter_ecef).norm(),
            (target_ecef - self.receiver_ecef).norm(),
        )
    }

    /// Linear signal-to-noise ratio of the echo from a target with the
    /// given radar cross-section.
    pub fn snr(&self, target_ecef: &Vector3<f64>, rcs_m2: f64) -> f64 {
        let (rt, rr) = self.bistatic_ranges(target_ecef);
        let received = self.power_scalar * rcs_m2 / (rt * rt * rr * rr);
        received / self.noise_floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budget() -> LinkBudget {
        LinkBudget::new(
            &TransmitterParams {
                power_w: 25_000.0,
                gain_db: 34.0,
                frequency_hz: 2.8e9,
                pulse_width_s: 1.0e-6,
            },
            &AntennaParams { gain_db: 2.15 },
            &ReceiverParams {
                noise_figure_db: 3.0,
                temperature_k: 290.0,
                bandwidth_hz: 2.0e6,
            },
            &Geodetic::new(34.052724, -117.596634, 282.0),
            &Geodetic::new(34.02, -117.45, 410.0),
        )
    }

    fn target_ecef() -> Vector3<f64> {
        geodetic_to_ecef(&Geodetic::new(34.1, -117.5, 3_000.0))
    }

    #[test]
    fn snr_is_linear_in_rcs() {
        let budget = budget();
        let target = target_ecef();
        let single = budget.snr(&target, 1.0);
        let double = budget.snr(&target, 2.0);
        assert!((double / single - 2.0).abs() < 1e-12);
    }

    #[test]
    fn doubling_transmit_power_doubles_snr() {
        let reference = budget();
        let boosted = LinkBudget::new(
            &TransmitterParams {
                power_w: 50_000.0,
                gain_db: 34.0,
                frequency_hz: 2.8e9,
                pulse_width_s: 1.0e-6,
            },
            &AntennaParams { gain_db: 2.15 },
            &ReceiverParams {
                noise_figure_db: 3.0,
                temperature_k: 290.0,
                bandwidth_hz: 2.0e6,
            },
            &Geodetic::new(34.052724, -117.596634, 282.0),
            &Geodetic::new(34.02, -117.45, 410.0),
        );
        let target = target_ecef();
        let ratio = boosted.snr(&target, 5.0) / reference.snr(&target, 5.0);
        assert!((ratio - 2.0).abs() < 1e-12);
    }

    #[test]
    fn snr_scales_with_inverse_square_of_each_leg() {
        let budget = budget();
        let near = target_ecef();
        let far = geodetic_to_ecef(&Geodetic::new(34.25, -117.3, 9_000.0));

        let (rt_near, rr_near) = budget.bistatic_ranges(&near);
        let (rt_far, rr_far) = budget.bistatic_ranges(&far);
        let predicted = (rt_near * rt_near * rr_near * rr_near)
            / (rt_far * rt_far * rr_far * rr_far);
        let measured = budget.snr(&far, 4.0) / budget.snr(&near, 4.0);
        assert!((measured / predicted - 1.0).abs() < 1e-9);
    }

    #[test]
    fn noise_floor_matches_mds_composition() {
        let budget = budget();
        let expected_db = linear_to_db(BOLTZMANN * 290.0) + 3.0 + linear_to_db(2.0e6);
        assert!((linear_to_db(budget.noise_floor()) - expected_db).abs() < 1e-9);
    }

    #[test]
    fn wavelength_follows_carrier_frequency() {
        let budget = budget();
        assert!((budget.wavelength_m() - SPEED_OF_LIGHT / 2.8e9).abs() < 1e-12);
    }

    #[test]
    fn direct_path_elevation_is_small_for_nearby_ground_sites() {
        // Sites ~14 km apart with a ~130 m height difference: the
        // transmitter sits within a degree of the receiver's horizon.
        let budget = budget();
        let elevation = budget.direct_path_elevation_deg();
        assert!(elevation.abs() < 1.0, "elevation {elevation}");
    }
}
