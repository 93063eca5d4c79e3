pub mod flight;
pub mod loader;
pub mod state;

pub use flight::{AircraftCategory, Flight, StateCursor};
pub use loader::load_flights;
pub use state::FlightState;
