use crate::engines::generation::chromosome::Chromosome;
use crate::types::Outcome;
use serde::Serialize;

/// Generation-wide averages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GenerationStats {
    pub average_time: f64,
    pub average_speed: f64,
    pub average_position: f64,
    pub average_coins: f64,
    pub average_score: f64,
    pub average_fitness: f64,
}

/// A fixed-capacity population evaluated together in one cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    capacity: usize,
    chromosomes: Vec<Chromosome>,
}

impl Generation {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            chromosomes: Vec::with_capacity(capacity),
        }
    }

    /// Wrap existing chromosomes; anything past `capacity` is dropped.
    pub fn from_chromosomes(capacity: usize, mut chromosomes: Vec<Chromosome>) -> Self {
        chromosomes.truncate(capacity);
        Self {
            capacity,
            chromosomes,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.chromosomes.len() >= self.capacity
    }

    /// Slots still open before the generation reaches capacity
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.chromosomes.len())
    }

    /// Add a chromosome; returns `false` when the generation is already full.
    pub fn push(&mut self, chromosome: Chromosome) -> bool {
        if self.is_full() {
            return false;
        }
        self.chromosomes.push(chromosome);
        true
    }

    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.chromosomes
    }

    pub fn chromosomes_mut(&mut self) -> &mut [Chromosome] {
        &mut self.chromosomes
    }

    pub fn get(&self, index: usize) -> Option<&Chromosome> {
        self.chromosomes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Chromosome> {
        self.chromosomes.iter()
    }

    /// True once every member carries an outcome
    pub fn is_evaluated(&self) -> bool {
        self.chromosomes.iter().all(|c| c.outcome().is_some())
    }

    pub fn average_position(&self) -> f64 {
        self.average_outcome(|o| o.x_pos)
    }

    pub fn average_time(&self) -> f64 {
        self.average_outcome(|o| o.time_left)
    }

    pub fn average_coins(&self) -> f64 {
        self.average_outcome(|o| f64::from(o.coins))
    }

    pub fn average_score(&self) -> f64 {
        self.average_outcome(|o| o.score as f64)
    }

    pub fn average_speed(&self, time_budget: f64) -> f64 {
        self.average_outcome(|o| o.speed(time_budget))
    }

    pub fn average_fitness(&self) -> f64 {
        if self.chromosomes.is_empty() {
            return 0.0;
        }
        let total: f64 = self.chromosomes.iter().map(Chromosome::fitness).sum();
        total / self.chromosomes.len() as f64
    }

    pub fn stats(&self, time_budget: f64) -> GenerationStats {
        GenerationStats {
            average_time: self.average_time(),
            average_speed: self.average_speed(time_budget),
            average_position: self.average_position(),
            average_coins: self.average_coins(),
            average_score: self.average_score(),
            average_fitness: self.average_fitness(),
        }
    }

    // Any member without an outcome zeroes the whole aggregate.
    fn average_outcome<F>(&self, metric: F) -> f64
    where
        F: Fn(&Outcome) -> f64,
    {
        if self.chromosomes.is_empty() {
            return 0.0;
        }
        let mut total = 0.0;
        for chromosome in &self.chromosomes {
            match chromosome.outcome() {
                Some(outcome) => total += metric(outcome),
                None => return 0.0,
            }
        }
        total / self.chromosomes.len() as f64
    }
}
