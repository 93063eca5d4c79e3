pub mod detection;
pub mod driver;

pub use detection::Detection;
pub use driver::{simulate, simulate_flight, PulseTrain, SimulationOutcome};
