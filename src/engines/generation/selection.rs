use crate::config::{SelectionConfig, SelectionMethod};
use crate::engines::generation::buttons::ButtonDistribution;
use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::crossover::CrossoverEngine;
use crate::engines::generation::mutation::MutationEngine;
use crate::engines::generation::population::Generation;
use crate::error::{MarioGaError, Result};
use log::{debug, warn};
use rand::Rng;
use std::cmp::Ordering;

/// Roulette redraws allowed while looking for a second parent that differs from the first
pub const MAX_PARENT_DRAWS: usize = 64;

/// Consecutive no-op crossovers tolerated before a copy is accepted anyway
pub const MAX_CROSSOVER_RETRIES: usize = 32;

/// Cumulative fitness shares in generation order
#[derive(Debug, Clone, PartialEq)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    pub fn new(fitness: &[f64]) -> Self {
        let total: f64 = fitness.iter().sum();
        let n = fitness.len();

        let cumulative = if total > 0.0 && total.is_finite() {
            let mut running = 0.0;
            fitness
                .iter()
                .map(|f| {
                    running += f / total;
                    running
                })
                .collect()
        } else {
            // Nothing to be proportional to; every slot gets the same share.
            (1..=n).map(|i| i as f64 / n as f64).collect()
        };

        Self { cumulative }
    }

    pub fn from_generation(generation: &Generation) -> Self {
        let fitness: Vec<f64> = generation.iter().map(Chromosome::fitness).collect();
        Self::new(&fitness)
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Index of the first slot whose cumulative share reaches `draw`.
    pub fn select(&self, draw: f64) -> usize {
        self.cumulative
            .iter()
            .position(|&share| share >= draw)
            .unwrap_or(self.cumulative.len().saturating_sub(1))
    }

    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.select(rng.gen::<f64>())
    }
}

/// Indices of the `count` fittest chromosomes, best first, ties kept in
/// generation order.
pub fn elite_indices(chromosomes: &[Chromosome], count: usize) -> Result<Vec<usize>> {
    if count > chromosomes.len() {
        return Err(MarioGaError::Elitism(format!(
            "asked for {} elites from a generation of {}",
            count,
            chromosomes.len()
        )));
    }
    let mut order: Vec<usize> = (0..chromosomes.len()).collect();
    order.sort_by(|&a, &b| {
        chromosomes[b]
            .fitness()
            .partial_cmp(&chromosomes[a].fitness())
            .unwrap_or(Ordering::Equal)
    });
    order.truncate(count);
    Ok(order)
}

/// What happened while filling a new generation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreedingReport {
    pub elites: usize,
    pub offspring: usize,
    pub mutations: usize,
    /// Pairs discarded because crossover left both parents unchanged
    pub rejected_pairs: usize,
    /// Second parents accepted despite matching the first after every redraw
    pub parent_draw_deviations: usize,
    /// Unchanged children accepted after the retry budget ran out
    pub crossover_deviations: usize,
}

/// Builds the next generation from a scored one
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    method: SelectionMethod,
    elite_count: usize,
}

impl SelectionEngine {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            method: config.method(),
            elite_count: config.elite_count(),
        }
    }

    pub fn elite_count(&self) -> usize {
        self.elite_count
    }

    pub fn breed<R: Rng + ?Sized>(
        &self,
        current: &Generation,
        population_size: usize,
        crossover: &CrossoverEngine,
        mutation: &MutationEngine,
        buttons: &ButtonDistribution,
        rng: &mut R,
    ) -> Result<(Generation, BreedingReport)> {
        match self.method {
            SelectionMethod::FitnessProportionate => self.breed_fitness_proportionate(
                current,
                population_size,
                crossover,
                mutation,
                buttons,
                rng,
            ),
            SelectionMethod::Stochastic => Err(MarioGaError::Unsupported(
                "stochastic selection".to_string(),
            )),
            SelectionMethod::Tournament => Err(MarioGaError::Unsupported(
                "tournament selection".to_string(),
            )),
            SelectionMethod::Truncation => Err(MarioGaError::Unsupported(
                "truncation selection".to_string(),
            )),
        }
    }

    fn breed_fitness_proportionate<R: Rng + ?Sized>(
        &self,
        current: &Generation,
        population_size: usize,
        crossover: &CrossoverEngine,
        mutation: &MutationEngine,
        buttons: &ButtonDistribution,
        rng: &mut R,
    ) -> Result<(Generation, BreedingReport)> {
        if current.is_empty() {
            return Err(MarioGaError::InvalidState {
                expected: "a populated generation".to_string(),
                actual: "an empty generation".to_string(),
            });
        }

        let mut report = BreedingReport::default();
        let mut next = Generation::new(population_size);

        for index in elite_indices(current.chromosomes(), self.elite_count)? {
            let elite = &current.chromosomes()[index];
            if !next.push(Chromosome::new(elite.actions().to_vec())) {
                return Err(MarioGaError::Elitism(format!(
                    "{} elites do not fit a population of {}",
                    self.elite_count, population_size
                )));
            }
            report.elites += 1;
        }

        let wheel = RouletteWheel::from_generation(current);
        let mut retries = 0;

        while !next.is_full() {
            let (first, second) = pick_parents(current, &wheel, rng, &mut report);
            let parent1 = &current.chromosomes()[first];
            let parent2 = &current.chromosomes()[second];

            let (mut child1, mut child2) = crossover.crossover(parent1, parent2, rng)?;

            if child1.is_clone_of(parent1) && child2.is_clone_of(parent2) {
                if retries < MAX_CROSSOVER_RETRIES {
                    retries += 1;
                    report.rejected_pairs += 1;
                    continue;
                }
                warn!(
                    "Crossover produced copies {} times in a row, accepting them",
                    retries + 1
                );
                report.crossover_deviations += 1;
            }
            retries = 0;

            if mutation.mutate(&mut child1, buttons, rng) {
                report.mutations += 1;
            }
            next.push(child1);
            report.offspring += 1;

            if !next.is_full() {
                if mutation.mutate(&mut child2, buttons, rng) {
                    report.mutations += 1;
                }
                next.push(child2);
                report.offspring += 1;
            }
        }

        debug!("Breeding report: {:?}", report);
        Ok((next, report))
    }
}

// First parent uniformly, second by roulette, redrawn while it is a clone of the first.
fn pick_parents<R: Rng + ?Sized>(
    current: &Generation,
    wheel: &RouletteWheel,
    rng: &mut R,
    report: &mut BreedingReport,
) -> (usize, usize) {
    let chromosomes = current.chromosomes();
    let first = rng.gen_range(0..chromosomes.len());

    let mut second = wheel.spin(rng);
    for _ in 1..MAX_PARENT_DRAWS {
        if !chromosomes[second].is_clone_of(&chromosomes[first]) {
            return (first, second);
        }
        second = wheel.spin(rng);
    }
    if chromosomes[second].is_clone_of(&chromosomes[first]) {
        debug!(
            "No distinct second parent after {} draws, pairing clones",
            MAX_PARENT_DRAWS
        );
        report.parent_draw_deviations += 1;
    }
    (first, second)
}
