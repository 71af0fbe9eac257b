use super::traits::ConfigSection;
use crate::error::MarioGaError;
use serde::{Deserialize, Serialize};

/// Time available per level, indexed by `[world - 1][stage - 1]`.
pub const LEVEL_TIME_BUDGETS: [[u32; 4]; 8] = [
    [400, 400, 300, 300],
    [400, 400, 300, 300],
    [400, 300, 300, 300],
    [400, 400, 300, 400],
    [300, 400, 300, 300],
    [400, 400, 300, 300],
    [400, 400, 300, 400],
    [300, 400, 300, 400],
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub world: u8,
    pub stage: u8,
    pub version: u8,
    pub render: bool,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            world: 1,
            stage: 1,
            version: 0,
            render: false,
        }
    }
}

impl LevelConfig {
    /// Identifier understood by the simulator, e.g. `SuperMarioBros-1-1-v0`
    pub fn level_id(&self) -> String {
        format!("SuperMarioBros-{}-{}-v{}", self.world, self.stage, self.version)
    }

    pub fn time_budget(&self) -> f64 {
        let world = usize::from(self.world).checked_sub(1);
        let stage = usize::from(self.stage).checked_sub(1);
        world
            .zip(stage)
            .and_then(|(w, s)| LEVEL_TIME_BUDGETS.get(w)?.get(s).copied())
            .map(f64::from)
            .unwrap_or(400.0)
    }

    /// Directory component shared by the log and import trees
    pub fn directory_name(&self) -> String {
        format!("World_{}_Stage_{}", self.world, self.stage)
    }
}

impl ConfigSection for LevelConfig {
    fn section_name() -> &'static str {
        "level"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        if !(1..=8).contains(&self.world) {
            return Err(MarioGaError::Configuration(format!(
                "World must be between 1 and 8, got {}",
                self.world
            )));
        }
        if !(1..=4).contains(&self.stage) {
            return Err(MarioGaError::Configuration(format!(
                "Stage must be between 1 and 4, got {}",
                self.stage
            )));
        }
        if self.version > 3 {
            return Err(MarioGaError::Configuration(format!(
                "Version must be between 0 and 3, got {}",
                self.version
            )));
        }
        Ok(())
    }
}
