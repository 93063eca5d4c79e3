/// Converts an altitude reported in feet (ADS-B convention) to meters.
pub fn feet_to_meters(feet: f64) -> f64 {
    feet * 0.3048
}

pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 10.0)
}

pub fn linear_to_db(linear: f64) -> f64 {
    10.0 * linear.log10()
}
