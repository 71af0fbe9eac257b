use super::traits::{check_unit_interval, ConfigSection};
use crate::error::MarioGaError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    pub size: usize,
    pub generations: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 100,
            generations: 50,
        }
    }
}

impl ConfigSection for PopulationConfig {
    fn section_name() -> &'static str {
        "population"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        if self.size == 0 || self.size > 1000 {
            return Err(MarioGaError::Configuration(format!(
                "Population size must be between 1 and 1000, got {}",
                self.size
            )));
        }
        if self.generations == 0 {
            return Err(MarioGaError::Configuration(
                "Generation cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossoverKind {
    OnePoint,
    MultiPoint,
    Uniform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossoverConfig {
    pub kind: CrossoverKind,
    /// Fraction of each parent's blocks kept before the cut
    pub one_point_rate: f64,
    pub multi_point_min: f64,
    pub multi_point_max: f64,
    /// Per-block swap probability for uniform crossover
    pub uniform_rate: f64,
    /// Probability that a pair is recombined at all
    pub frequency: f64,
}

impl Default for CrossoverConfig {
    fn default() -> Self {
        Self {
            kind: CrossoverKind::Uniform,
            one_point_rate: 0.5,
            multi_point_min: 0.0,
            multi_point_max: 0.0,
            uniform_rate: 0.5,
            frequency: 0.95,
        }
    }
}

impl ConfigSection for CrossoverConfig {
    fn section_name() -> &'static str {
        "crossover"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        check_unit_interval("Crossover frequency", self.frequency)?;
        match self.kind {
            CrossoverKind::OnePoint => check_unit_interval("One-point rate", self.one_point_rate),
            CrossoverKind::Uniform => check_unit_interval("Uniform rate", self.uniform_rate),
            CrossoverKind::MultiPoint => {
                check_unit_interval("Multi-point min", self.multi_point_min)?;
                check_unit_interval("Multi-point max", self.multi_point_max)?;
                if self.multi_point_max <= self.multi_point_min {
                    return Err(MarioGaError::Configuration(
                        "Multi-point max must be greater than min".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    pub frequency: f64,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self { frequency: 0.015 }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        check_unit_interval("Mutation frequency", self.frequency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMethod {
    FitnessProportionate,
    Stochastic,
    Tournament,
    Truncation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub fitness_proportionate: bool,
    pub stochastic: bool,
    pub tournament: bool,
    pub truncation: bool,
    pub elitism: bool,
    pub top: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            fitness_proportionate: true,
            stochastic: false,
            tournament: false,
            truncation: false,
            elitism: true,
            top: 5,
        }
    }
}

impl SelectionConfig {
    /// Default selection adjusted so the elite count fits the population.
    pub fn default_for(population_size: usize) -> Self {
        let defaults = Self::default();
        let top = defaults.top.min(population_size / 2);
        Self {
            elitism: top >= 1,
            top,
            ..defaults
        }
    }

    /// The single active method. Only meaningful after validation.
    pub fn method(&self) -> SelectionMethod {
        if self.stochastic {
            SelectionMethod::Stochastic
        } else if self.tournament {
            SelectionMethod::Tournament
        } else if self.truncation {
            SelectionMethod::Truncation
        } else {
            SelectionMethod::FitnessProportionate
        }
    }

    pub fn elite_count(&self) -> usize {
        if self.elitism {
            self.top
        } else {
            0
        }
    }

    pub fn validate_for(&self, population_size: usize) -> Result<(), MarioGaError> {
        self.validate()?;
        if self.elitism && (self.top == 0 || self.top > population_size / 2) {
            return Err(MarioGaError::Configuration(format!(
                "Elitism top must be between 1 and {}, got {}",
                population_size / 2,
                self.top
            )));
        }
        Ok(())
    }
}

impl ConfigSection for SelectionConfig {
    fn section_name() -> &'static str {
        "selection"
    }

    fn validate(&self) -> Result<(), MarioGaError> {
        let active = [
            self.fitness_proportionate,
            self.stochastic,
            self.tournament,
            self.truncation,
        ]
        .iter()
        .filter(|flag| **flag)
        .count();
        if active != 1 {
            return Err(MarioGaError::Configuration(format!(
                "Exactly one selection method must be enabled, got {}",
                active
            )));
        }
        Ok(())
    }
}
