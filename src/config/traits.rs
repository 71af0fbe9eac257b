use crate::error::MarioGaError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
///
/// Every section can stand on its own: when its values are missing or fail
/// validation, the manager swaps in `Default::default()` for that section only.
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), MarioGaError>;
}

pub(crate) fn check_unit_interval(name: &str, value: f64) -> Result<(), MarioGaError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(MarioGaError::Configuration(format!(
            "{} must be between 0 and 1, got {}",
            name, value
        )));
    }
    Ok(())
}
