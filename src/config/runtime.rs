use super::traits::ConfigSection;
use crate::error::MarioGaError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub url: String,
    pub endpoint: String,
    pub timeout_secs: Option<u64>,
    /// Concurrent simulator calls per generation; 1 keeps evaluation sequential
    pub workers: usize,
    /// Re-run the champion with rendering after each scored generation
    pub replay_champion: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".to_string(),
            endpoint: "/goMarioGo".to_string(),
            timeout_secs: None,
            workers: 1,
            replay_champion: false,
        }
    }
}

impl ConfigSection for SimulatorConfig {
    fn section_name() -> &'static str {
        "simulator"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(MarioGaError::Configuration(format!(
                "Simulator url must be http(s), got {}",
                self.url
            )));
        }
        if self.workers == 0 {
            return Err(MarioGaError::Configuration(
                "Simulator workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: Option<u64>,
    pub import_file: Option<String>,
    pub logs_dir: PathBuf,
    pub imports_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            import_file: None,
            logs_dir: PathBuf::from("logs"),
            imports_dir: PathBuf::from("imports"),
        }
    }
}

impl ConfigSection for SessionConfig {
    fn section_name() -> &'static str {
        "session"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        if self.import_file.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(MarioGaError::Configuration(
                "Import file name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
