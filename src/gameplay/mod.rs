pub mod flight;
pub mod round_flow;

pub use flight::FlightPlugin;
pub use round_flow::{RoundPlugin, RoundRng};
