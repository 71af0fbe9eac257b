use super::traits::ConfigSection;
use crate::error::MarioGaError;
use crate::types::ACTION_COUNT;
use serde::{Deserialize, Serialize};

/// How often each action code is drawn, in parts of 100
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    pub frequencies: [u32; ACTION_COUNT],
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            frequencies: [2, 10, 20, 30, 10, 10, 3, 5, 5, 3, 1, 1],
        }
    }
}

impl ConfigSection for ButtonConfig {
    fn section_name() -> &'static str {
        "buttons"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        let total: u64 = self.frequencies.iter().map(|&f| u64::from(f)).sum();
        if total != 100 {
            return Err(MarioGaError::Configuration(format!(
                "Button frequencies must sum to 100, got {}",
                total
            )));
        }
        Ok(())
    }
}

/// Per-metric fitness weights; the position weight is derived from these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightConfig {
    pub score: u32,
    pub coin: u32,
    pub speedrun: u32,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            score: 10,
            coin: 10,
            speedrun: 10,
        }
    }
}

impl WeightConfig {
    /// Position always carries 1.5x the combined weight of everything else.
    pub fn position(&self) -> f64 {
        f64::from(self.score + self.coin + self.speedrun) * 1.5
    }
}

impl ConfigSection for WeightConfig {
    fn section_name() -> &'static str {
        "weights"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        for (name, value) in [
            ("Score", self.score),
            ("Coin", self.coin),
            ("Speedrun", self.speedrun),
        ] {
            if value > 10 {
                return Err(MarioGaError::Configuration(format!(
                    "{} weight must be between 0 and 10, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
