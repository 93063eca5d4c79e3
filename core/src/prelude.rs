/// Errors raised while validating static radar configuration.
///
/// Every detection computation depends on the precomputed link-budget
/// constants, so validation runs to completion before any simulation work
/// is scheduled and a failure here aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("parameter {name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("parameter {name} is not a finite number")]
    NotFinite { name: &'static str },
}

/// Errors raised while deserializing trajectory input.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("reading trajectory input: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing trajectory input: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while decoding stored detection records.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("record truncated: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name });
    }
    if value <= 0.0 {
        return Err(ConfigError::NotPositive { name, value });
    }
    Ok(value)
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { name });
    }
    Ok(value)
}
