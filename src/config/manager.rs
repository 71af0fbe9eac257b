use super::{
    evolution::{CrossoverConfig, MutationConfig, PopulationConfig, SelectionConfig},
    fitness::{ButtonConfig, WeightConfig},
    level::LevelConfig,
    runtime::{SessionConfig, SimulatorConfig},
    traits::ConfigSection,
};
use crate::error::MarioGaError;
use config::{Config, ConfigError, Environment, File, FileFormat};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub level: LevelConfig,
    pub buttons: ButtonConfig,
    pub weights: WeightConfig,
    pub population: PopulationConfig,
    pub crossover: CrossoverConfig,
    pub mutation: MutationConfig,
    pub selection: SelectionConfig,
    pub simulator: SimulatorConfig,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), MarioGaError> {
        self.level.validate()?;
        self.buttons.validate()?;
        self.weights.validate()?;
        self.population.validate()?;
        self.crossover.validate()?;
        self.mutation.validate()?;
        self.selection.validate_for(self.population.size)?;
        self.simulator.validate()?;
        self.session.validate()?;
        Ok(())
    }
}

/// Environment variables override file values, e.g. `MARIO_GA__POPULATION__SIZE=40`.
pub const ENV_PREFIX: &str = "MARIO_GA";

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Load every section from an optional TOML file plus the environment.
    ///
    /// Never fails: a section that is missing, unparsable or invalid is
    /// replaced by its defaults without touching the other sections.
    pub fn load(path: Option<&Path>) -> Self {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                warn!("Config file {} not found, using defaults", path.display());
            }
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = match builder.build() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to read configuration ({}), using defaults", e);
                Config::default()
            }
        };

        Self {
            config: Self::from_settings(&settings),
        }
    }

    fn from_settings(settings: &Config) -> AppConfig {
        let population: PopulationConfig = load_section(settings);

        let selection = match read_section::<SelectionConfig>(settings) {
            Some(selection) => match selection.validate_for(population.size) {
                Ok(()) => selection,
                Err(e) => {
                    warn!("{} -> switched [selection] to default values", e);
                    SelectionConfig::default_for(population.size)
                }
            },
            None => SelectionConfig::default_for(population.size),
        };

        AppConfig {
            level: load_section(settings),
            buttons: load_section(settings),
            weights: load_section(settings),
            crossover: load_section(settings),
            mutation: load_section(settings),
            simulator: load_section(settings),
            session: load_section(settings),
            population,
            selection,
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), MarioGaError> {
        let toml_str = self.to_toml()?;
        std::fs::write(path, toml_str)
            .map_err(|e| MarioGaError::Configuration(format!("Failed to write config: {}", e)))?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, MarioGaError> {
        toml::to_string_pretty(&self.config)
            .map_err(|e| MarioGaError::Configuration(format!("Failed to serialize: {}", e)))
    }

    pub fn get(&self) -> AppConfig {
        self.config.clone()
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), MarioGaError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        candidate.validate()?;
        self.config = candidate;
        Ok(())
    }
}

/// Read one section, falling back to its defaults on any problem.
fn load_section<T: ConfigSection>(settings: &Config) -> T {
    match read_section::<T>(settings) {
        Some(section) => match section.validate() {
            Ok(()) => section,
            Err(e) => {
                warn!("{} -> switched [{}] to default values", e, T::section_name());
                T::default()
            }
        },
        None => T::default(),
    }
}

fn read_section<T: ConfigSection>(settings: &Config) -> Option<T> {
    match settings.get::<T>(T::section_name()) {
        Ok(section) => Some(section),
        Err(ConfigError::NotFound(_)) => {
            debug!("No [{}] section, using defaults", T::section_name());
            None
        }
        Err(e) => {
            warn!(
                "Could not parse [{}] ({}) -> switched to default values",
                T::section_name(),
                e
            );
            None
        }
    }
}
