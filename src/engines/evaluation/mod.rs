pub mod fitness;
pub mod http;
pub mod simulator;

pub use fitness::{FitnessEngine, FitnessFactors};
pub use http::HttpSimulator;
pub use simulator::{SimulationRequest, Simulator};
