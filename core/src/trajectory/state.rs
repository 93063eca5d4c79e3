use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::math::ellipsoid::{geodetic_to_ecef, Aer, Geodetic};
use crate::math::units::feet_to_meters;
use crate::prelude::CodecError;

/// Number of bytes in one encoded state record.
pub const STATE_RECORD_LEN: usize = 40;

/// Immutable snapshot of one aircraft at one instant.
///
/// All three position encodings refer to the same physical point: the ECEF
/// vector is derived from the geodetic triple at construction. The AER
/// triple is relative to the fixed reference receiver used during
/// ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// Seconds since the simulation epoch.
    pub t: f64,
    pub geodetic: Geodetic,
    pub ecef: Vector3<f64>,
    pub aer: Aer,
}

impl FlightState {
    /// Builds a state from an ingested record. `alt_geom_ft` arrives in
    /// feet per the broadcast convention.
    pub fn new(t: f64, lat_deg: f64, lon_deg: f64, alt_geom_ft: f64, aer: Aer) -> Self {
        let geodetic = Geodetic::new(lat_deg, lon_deg, feet_to_meters(alt_geom_ft));
        let ecef = geodetic_to_ecef(&geodetic);
        Self {
            t,
            geodetic,
            ecef,
            aer,
        }
    }

    /// Appends the fixed 40-byte big-endian record to `out`: time, then
    /// the geodetic, ECEF, and AER triples, all as f32.
    pub fn encode(&self, out: &mut Vec<u8>) {
        for value in [
            self.t,
            self.geodetic.lat_deg,
            self.geodetic.lon_deg,
            self.geodetic.alt_m,
            self.ecef.x,
            self.ecef.y,
            self.ecef.z,
            self.aer.az_deg,
            self.aer.el_deg,
            self.aer.range_m,
        ] {
            out.extend_from_slice(&(value as f32).to_be_bytes());
        }
    }

    /// Decodes one record from the front of `data`.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        if data.len() < STATE_RECORD_LEN {
            return Err(CodecError::Truncated {
                expected: STATE_RECORD_LEN,
                actual: data.len(),
            });
        }
        let mut fields = [0f64; 10];
        for (i, field) in fields.iter_mut().enumerate() {
            let mut raw = [0u8; 4];
            raw.copy_from_slice(&data[i * 4..i * 4 + 4]);
            *field = f32::from_be_bytes(raw) as f64;
        }
        Ok(Self {
            t: fields[0],
            geodetic: Geodetic::new(fields[1], fields[2], fields[3]),
            ecef: Vector3::new(fields[4], fields[5], fields[6]),
            aer: Aer {
                az_deg: fields[7],
                el_deg: fields[8],
                range_m: fields[9],
            },
        })
    }
}
