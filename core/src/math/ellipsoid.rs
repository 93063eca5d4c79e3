use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// WGS-84 semi-major axis in meters.
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS-84 first eccentricity squared.
pub const WGS84_E2: f64 = 6.694_379_990_14e-3;

/// Geodetic position: latitude/longitude in degrees, altitude above the
/// ellipsoid in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geodetic {
    pub lat_deg: f64,
    pub lon_deg: f64,
    pub alt_m: f64,
}

impl Geodetic {
    pub fn new(lat_deg: f64, lon_deg: f64, alt_m: f64) -> Self {
        Self {
            lat_deg,
            lon_deg,
            alt_m,
        }
    }
}

/// Local azimuth/elevation/range relative to a fixed observer. Azimuth is
/// clockwise from north in [0, 360) degrees, range in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aer {
    pub az_deg: f64,
    pub el_deg: f64,
    pub range_m: f64,
}

/// Converts geodetic coordinates to Earth-centered-Earth-fixed meters.
pub fn geodetic_to_ecef(geo: &Geodetic) -> Vector3<f64> {
    let lat = geo.lat_deg.to_radians();
    let lon = geo.lon_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    let n = WGS84_A / (1.0 - WGS84_E2 * sin_lat * sin_lat).sqrt();
    Vector3::new(
        (n + geo.alt_m) * cos_lat * cos_lon,
        (n + geo.alt_m) * cos_lat * sin_lon,
        (n * (1.0 - WGS84_E2) + geo.alt_m) * sin_lat,
    )
}

/// Expresses an ECEF point in the local East-North-Up frame of `origin`.
pub fn ecef_to_enu(ecef: &Vector3<f64>, origin: &Geodetic) -> Vector3<f64> {
    let delta = ecef - geodetic_to_ecef(origin);
    let lat = origin.lat_deg.to_radians();
    let lon = origin.lon_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    Vector3::new(
        -sin_lon * delta.x + cos_lon * delta.y,
        -sin_lat * cos_lon * delta.x - sin_lat * sin_lon * delta.y + cos_lat * delta.z,
        cos_lat * cos_lon * delta.x + cos_lat * sin_lon * delta.y + sin_lat * delta.z,
    )
}

/// Converts an ECEF point to azimuth/elevation/range about `origin`.
pub fn ecef_to_aer(ecef: &Vector3<f64>, origin: &Geodetic) -> Aer {
    let enu = ecef_to_enu(ecef, origin);
    let horizontal = (enu.x * enu.x + enu.y * enu.y).sqrt();
    let mut az_deg = enu.x.atan2(enu.y).to_degrees();
    if az_deg < 0.0 {
        az_deg += 360.0;
    }
    Aer {
        az_deg,
        el_deg: enu.z.atan2(horizontal).to_degrees(),
        range_m: enu.norm(),
    }
}
