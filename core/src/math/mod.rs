pub mod angles;
pub mod ellipsoid;
pub mod units;

pub use angles::azimuth_separation;
pub use ellipsoid::{Aer, Geodetic};
