//! Detection-modeling core for the Rust bistatic passive-radar platform.
//!
//! The modules mirror the legacy ADS-B replay pipeline while providing
//! typed configuration with up-front validation, per-session trajectory
//! cursors, and a parallel pulse-sweep simulation driver.

pub mod math;
pub mod prelude;
pub mod radar;
pub mod sim;
pub mod telemetry;
pub mod trajectory;

pub use prelude::{CodecError, ConfigError, LoadError};
