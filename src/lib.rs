pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use error::{MarioGaError, Result};
