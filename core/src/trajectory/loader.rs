use std::collections::BTreeMap;
use std::io::Read;

use log::warn;
use serde::Deserialize;

use crate::math::ellipsoid::Aer;
use crate::prelude::LoadError;
use crate::trajectory::flight::{AircraftCategory, Flight};
use crate::trajectory::state::FlightState;

/// One position record as produced by the ingestion collaborator: absolute
/// unix time, geodetic position with the altitude still in feet, and the
/// AER triple precomputed against the reference receiver.
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    t: f64,
    lat: f64,
    lon: f64,
    alt_geom: f64,
    #[serde(rename = "AER")]
    aer: [f64; 3],
}

/// Loads the ingester's id -> records mapping, rebasing timestamps to
/// seconds since `epoch_unix`.
///
/// Malformed records and flights with no usable records are excluded with
/// a warning; they never abort the batch.
pub fn load_flights<R: Read>(reader: R, epoch_unix: f64) -> Result<Vec<Flight>, LoadError> {
    let data: BTreeMap<String, Vec<serde_json::Value>> = serde_json::from_reader(reader)?;

    let mut flights = Vec::with_capacity(data.len());
    for (id, records) in data {
        let category = records
            .first()
            .and_then(|record| record.get("category"))
            .and_then(|code| code.as_str())
            .map(AircraftCategory::from_code)
            .unwrap_or_default();

        let mut states = Vec::with_capacity(records.len());
        for record in &records {
            match parse_record(record, epoch_unix) {
                Some(state) => states.push(state),
                None => warn!("flight {id}: dropping malformed record"),
            }
        }
        if states.is_empty() {
            warn!("flight {id}: no usable records, excluded from run");
            continue;
        }
        flights.push(Flight::new(id, category, states));
    }
    Ok(flights)
}

fn parse_record(record: &serde_json::Value, epoch_unix: f64) -> Option<FlightState> {
    let raw: RawRecord = serde_json::from_value(record.clone()).ok()?;
    let t = raw.t - epoch_unix;
    if !t.is_finite() || t < 0.0 {
        return None;
    }
    if !(raw.lat.is_finite() && raw.lon.is_finite() && raw.alt_geom.is_finite()) {
        return None;
    }
    if raw.aer.iter().any(|v| !v.is_finite()) {
        return None;
    }
    let aer = Aer {
        az_deg: raw.aer[0],
        el_deg: raw.aer[1],
        range_m: raw.aer[2],
    };
    Some(FlightState::new(t, raw.lat, raw.lon, raw.alt_geom, aer))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPOCH: f64 = 1_740_787_200.0;

    fn record(offset: f64) -> String {
        format!(
            r#"{{"t": {}, "lat": 34.05, "lon": -117.6, "alt_geom": 12000, "AER": [120.0, 2.5, 15000.0], "category": "A3"}}"#,
            EPOCH + offset
        )
    }

    #[test]
    fn loads_flights_and_rebases_times() {
        let json = format!(
            r#"{{"a1b2c3": [{}, {}]}}"#,
            record(10.0),
            record(40.0)
        );
        let flights = load_flights(json.as_bytes(), EPOCH).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].id, "a1b2c3");
        assert_eq!(flights[0].category, AircraftCategory::A3);
        let times: Vec<f64> = flights[0].states().iter().map(|s| s.t).collect();
        assert_eq!(times, vec![10.0, 40.0]);
    }

    #[test]
    fn malformed_record_is_dropped_not_fatal() {
        let json = format!(
            r#"{{"a1b2c3": [{}, {{"lat": 34.0}}, {}]}}"#,
            record(5.0),
            record(6.0)
        );
        let flights = load_flights(json.as_bytes(), EPOCH).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].states().len(), 2);
    }

    #[test]
    fn flight_with_no_usable_records_is_excluded() {
        let json = format!(
            r#"{{"empty0": [{{"junk": true}}], "good12": [{}]}}"#,
            record(1.0)
        );
        let flights = load_flights(json.as_bytes(), EPOCH).unwrap();
        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].id, "good12");
    }

    #[test]
    fn missing_category_defaults_to_small() {
        let json = format!(
            r#"{{"nocategory": [{{"t": {}, "lat": 34.0, "lon": -117.0, "alt_geom": 9000, "AER": [0.0, 1.0, 5000.0]}}]}}"#,
            EPOCH + 2.0
        );
        let flights = load_flights(json.as_bytes(), EPOCH).unwrap();
        assert_eq!(flights[0].category, AircraftCategory::A1);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = load_flights("not json".as_bytes(), EPOCH).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
