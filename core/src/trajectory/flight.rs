use serde::{Deserialize, Serialize};

use crate::trajectory::state::FlightState;

/// Samples closer than this to the query time are accepted without
/// searching.
pub const CLOSE_ENOUGH_S: f64 = 5.0;
/// Samples farther than this from the query time are too old to represent
/// the aircraft's true position.
pub const MAX_STALENESS_S: f64 = 15.0;

/// ADS-B emitter category codes. The set is closed so a category lookup
/// can never fail mid-simulation; unknown codes parse to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AircraftCategory {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    A7,
    Other,
}

impl AircraftCategory {
    pub fn from_code(code: &str) -> Self {
        match code {
            "A0" => Self::A0,
            "A1" => Self::A1,
            "A2" => Self::A2,
            "A3" => Self::A3,
            "A4" => Self::A4,
            "A5" => Self::A5,
            "A6" => Self::A6,
            "A7" => Self::A7,
            _ => Self::Other,
        }
    }
}

impl Default for AircraftCategory {
    /// Aircraft that never broadcast a category are assumed small.
    fn default() -> Self {
        Self::A1
    }
}

/// Position hint into one flight's state sequence.
///
/// Owned by the query session, never by the flight itself: each parallel
/// worker holds its own cursor, so `Flight` stays immutable and shareable
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCursor {
    index: usize,
}

/// One aircraft's full observed history, sorted ascending by time at
/// construction and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Flight {
    pub id: String,
    pub category: AircraftCategory,
    states: Vec<FlightState>,
}

impl Flight {
    pub fn new(
        id: impl Into<String>,
        category: AircraftCategory,
        mut states: Vec<FlightState>,
    ) -> Self {
        states.sort_by(|a, b| a.t.total_cmp(&b.t));
        Self {
            id: id.into(),
            category,
            states,
        }
    }

    pub fn states(&self) -> &[FlightState] {
        &self.states
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Fresh cursor for one sequential query session.
    pub fn cursor(&self) -> StateCursor {
        StateCursor::default()
    }

    /// Returns the recorded state nearest to `t`, or `None` when the
    /// nearest sample is more than [`MAX_STALENESS_S`] seconds away.
    ///
    /// Queries arriving in non-decreasing `t` order hit an O(1) fast path
    /// that only inspects the cursor sample and its successor; gaps in the
    /// recording (dropped broadcast messages) fall back to a binary search
    /// over the full sequence.
    pub fn state_at<'a>(&'a self, cursor: &mut StateCursor, t: f64) -> Option<&'a FlightState> {
        if self.states.is_empty() {
            return None;
        }

        if cursor.index + 1 < self.states.len() {
            let current_dt = (self.states[cursor.index].t - t).abs();
            let next_dt = (self.states[cursor.index + 1].t - t).abs();
            if current_dt.min(next_dt) < CLOSE_ENOUGH_S {
                if next_dt < current_dt {
                    cursor.index += 1;
                }
                return Some(&self.states[cursor.index]);
            }
        }

        let idx = self.nearest_index(t);
        if (self.states[idx].t - t).abs() > MAX_STALENESS_S {
            return None;
        }
        cursor.index = idx;
        Some(&self.states[idx])
    }

    /// Index of the sample nearest to `t`: binary search for the
    /// bracketing pair, then the nearer bracket (ties toward the lower
    /// index).
    fn nearest_index(&self, t: f64) -> usize {
        let (low, high) = self.bracket(t);
        let low_dt = (self.states[low].t - t).abs();
        let high_dt = (self.states[high].t - t).abs();
        if high_dt < low_dt {
            high
        } else {
            low
        }
    }

    /// Bracketing indices around `t`. An exact match on the low, high, or
    /// midpoint element short-circuits.
    fn bracket(&self, t: f64) -> (usize, usize) {
        let mut low = 0;
        let mut high = self.states.len() - 1;
        while high > low {
            let mid = (high + low) / 2;
            if self.states[low].t == t {
                return (low, low);
            } else if self.states[mid].t == t {
                return (mid, mid);
            } else if self.states[high].t == t {
                return (high, high);
            } else if self.states[mid].t > t {
                if high == mid {
                    return (low, high);
                }
                high = mid;
            } else {
                if low == mid {
                    return (low, high);
                }
                low = mid;
            }
        }
        (low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::ellipsoid::Aer;

    fn state(t: f64) -> FlightState {
        FlightState::new(
            t,
            34.0,
            -117.0,
            10_000.0,
            Aer {
                az_deg: 0.0,
                el_deg: 1.0,
                range_m: 10_000.0,
            },
        )
    }

    fn flight(times: &[f64]) -> Flight {
        Flight::new(
            "abc123",
            AircraftCategory::A1,
            times.iter().map(|&t| state(t)).collect(),
        )
    }

    #[test]
    fn category_codes_parse_with_fallback() {
        assert_eq!(AircraftCategory::from_code("A3"), AircraftCategory::A3);
        assert_eq!(AircraftCategory::from_code("B2"), AircraftCategory::Other);
        assert_eq!(AircraftCategory::default(), AircraftCategory::A1);
    }

    #[test]
    fn states_are_sorted_at_construction() {
        let f = flight(&[30.0, 10.0, 20.0]);
        let times: Vec<f64> = f.states().iter().map(|s| s.t).collect();
        assert_eq!(times, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn empty_flight_answers_none_for_every_query() {
        let f = flight(&[]);
        let mut cursor = f.cursor();
        assert!(f.state_at(&mut cursor, 0.0).is_none());
        assert!(f.state_at(&mut cursor, 100.0).is_none());
    }

    #[test]
    fn nearest_sample_is_returned_for_in_range_queries() {
        let f = flight(&[0.0, 10.0, 20.0, 30.0]);
        let mut cursor = f.cursor();
        assert_eq!(f.state_at(&mut cursor, 12.0).unwrap().t, 10.0);
        assert_eq!(f.state_at(&mut cursor, 18.0).unwrap().t, 20.0);
        assert_eq!(f.state_at(&mut cursor, 30.0).unwrap().t, 30.0);
    }

    #[test]
    fn stale_queries_return_none() {
        let f = flight(&[0.0, 10.0]);
        let mut cursor = f.cursor();
        // 16 seconds past the last sample
        assert!(f.state_at(&mut cursor, 26.0).is_none());
        // far before the first sample
        let mut cursor = f.cursor();
        assert!(f.state_at(&mut cursor, -100.0).is_none());
        // far past the end of the recording
        let mut cursor = f.cursor();
        assert!(f.state_at(&mut cursor, 1_000.0).is_none());
    }

    #[test]
    fn gap_in_recording_falls_back_to_search() {
        // 200-second hole between the two halves of the recording
        let f = flight(&[0.0, 5.0, 10.0, 210.0, 215.0]);
        let mut cursor = f.cursor();
        assert_eq!(f.state_at(&mut cursor, 4.0).unwrap().t, 5.0);
        assert!(f.state_at(&mut cursor, 100.0).is_none());
        assert_eq!(f.state_at(&mut cursor, 212.0).unwrap().t, 210.0);
    }

    #[test]
    fn cursor_fast_path_matches_binary_search() {
        let f = flight(&[0.0, 4.0, 9.0, 15.0, 22.0, 30.0, 41.0, 55.0]);
        let mut cursor = f.cursor();
        // Ascending sweep finer than the sample spacing, the expected
        // access pattern for a pulse train.
        let mut t = 0.0;
        while t < 60.0 {
            let fast = f.state_at(&mut cursor, t).map(|s| s.t);
            let idx = f.nearest_index(t);
            let searched = if (f.states[idx].t - t).abs() > MAX_STALENESS_S {
                None
            } else {
                Some(f.states[idx].t)
            };
            assert_eq!(fast, searched, "diverged at t={t}");
            t += 0.5;
        }
    }
}
