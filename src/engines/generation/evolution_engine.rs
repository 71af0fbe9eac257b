use crate::config::AppConfig;
use crate::data::GenerationStore;
use crate::engines::evaluation::{FitnessEngine, SimulationRequest, Simulator};
use crate::engines::generation::{
    buttons::{baseline_actions, ButtonDistribution},
    chromosome::Chromosome,
    crossover::CrossoverEngine,
    hall_of_fame::HallOfFame,
    mutation::MutationEngine,
    population::Generation,
    progress::ProgressCallback,
    selection::{BreedingReport, SelectionEngine},
};
use crate::error::{MarioGaError, Result};
use crate::types::Outcome;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fmt;

/// Where a session is in its evaluate / score / persist / breed cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Initialized,
    Evaluated,
    Scored,
    Persisted,
    Done,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Initialized => "INITIALIZED",
            SessionState::Evaluated => "EVALUATED",
            SessionState::Scored => "SCORED",
            SessionState::Persisted => "PERSISTED",
            SessionState::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// One evolutionary run, owned by the caller
pub struct EvolutionEngine {
    config: AppConfig,
    session_id: i64,
    generation: Generation,
    generation_number: usize,
    state: SessionState,
    hall_of_fame: HallOfFame,
    buttons: ButtonDistribution,
    fitness: FitnessEngine,
    selection: SelectionEngine,
    crossover: CrossoverEngine,
    mutation: MutationEngine,
    last_breeding: Option<BreedingReport>,
    rng: StdRng,
}

impl EvolutionEngine {
    /// Start a session with a freshly seeded first generation.
    ///
    /// Slot 0 always holds the baseline sequence; every other slot gets a
    /// random burst drawn from the button frequencies.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;

        let mut rng = match config.session.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let buttons = ButtonDistribution::new(&config.buttons.frequencies)?;

        let size = config.population.size;
        let mut generation = Generation::new(size);
        generation.push(Chromosome::new(baseline_actions()));
        while !generation.is_full() {
            generation.push(Chromosome::new(buttons.burst(&mut rng)));
        }

        Ok(Self {
            session_id: chrono::Utc::now().timestamp_millis(),
            fitness: FitnessEngine::new(config.weights, config.level.time_budget()),
            selection: SelectionEngine::new(&config.selection),
            crossover: CrossoverEngine::new(config.crossover.clone()),
            mutation: MutationEngine::new(config.mutation.frequency),
            generation,
            generation_number: 1,
            state: SessionState::Initialized,
            hall_of_fame: HallOfFame::new(),
            last_breeding: None,
            buttons,
            config,
            rng,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn generation(&self) -> &Generation {
        &self.generation
    }

    pub fn generation_number(&self) -> usize {
        self.generation_number
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn champion(&self) -> Option<&Chromosome> {
        self.hall_of_fame.champion()
    }

    pub fn hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    /// Counters from the most recent breeding step
    pub fn last_breeding(&self) -> Option<&BreedingReport> {
        self.last_breeding.as_ref()
    }

    /// Store the session writes to, derived from the configured directories
    pub fn store(&self) -> GenerationStore {
        GenerationStore::new(&self.config.session, &self.config.level, self.session_id)
    }

    fn expect_state(&self, expected: SessionState) -> Result<()> {
        if self.state != expected {
            return Err(MarioGaError::InvalidState {
                expected: expected.to_string(),
                actual: self.state.to_string(),
            });
        }
        Ok(())
    }

    /// Replace the current, not yet evaluated, generation with the last one
    /// saved in an import file.
    ///
    /// Extra solutions are dropped and missing slots are filled with random
    /// bursts. On any error the current generation is left as it was.
    pub fn import_generation(&mut self, store: &GenerationStore, name: &str) -> Result<usize> {
        self.expect_state(SessionState::Initialized)?;

        let solutions = store.load_import(name)?;
        if solutions.is_empty() {
            return Err(MarioGaError::Import(format!(
                "{} contains no solutions",
                name
            )));
        }

        let size = self.config.population.size;
        let imported = solutions.len().min(size);
        if solutions.len() > size {
            warn!(
                "Import holds {} solutions, keeping the first {}",
                solutions.len(),
                size
            );
        }

        let chromosomes = solutions.into_iter().map(Chromosome::new).collect();
        let mut generation = Generation::from_chromosomes(size, chromosomes);
        while !generation.is_full() {
            generation.push(Chromosome::new(self.buttons.burst(&mut self.rng)));
        }
        self.generation = generation;

        info!("Imported {} chromosomes from {}", imported, name);
        Ok(imported)
    }

    /// Run every chromosome through the simulator.
    ///
    /// A failed call is logged and leaves that chromosome without an outcome.
    /// With more than one worker the calls run on a dedicated pool and all of
    /// them finish before this returns.
    pub fn evaluate<S, C>(&mut self, simulator: &S, callback: &mut C) -> Result<()>
    where
        S: Simulator + ?Sized,
        C: ProgressCallback + ?Sized,
    {
        self.expect_state(SessionState::Initialized)?;

        let level = self.config.level.level_id();
        let render = self.config.level.render;
        let workers = self.config.simulator.workers;
        let total = self.generation.len();

        let chromosomes = self.generation.chromosomes_mut();
        if workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|e| {
                    MarioGaError::Simulation(format!("Cannot start evaluation pool: {}", e))
                })?;
            pool.install(|| {
                chromosomes.par_iter_mut().enumerate().for_each(|(i, chromosome)| {
                    evaluate_one(simulator, chromosome, i, &level, render);
                });
            });
            for i in 0..total {
                callback.on_chromosome_evaluated(i + 1, total);
            }
        } else {
            for (i, chromosome) in chromosomes.iter_mut().enumerate() {
                evaluate_one(simulator, chromosome, i, &level, render);
                callback.on_chromosome_evaluated(i + 1, total);
            }
        }

        self.state = SessionState::Evaluated;
        Ok(())
    }

    /// Score the evaluated generation, reshape its sequences and update the champion.
    pub fn score(&mut self) -> Result<()> {
        self.expect_state(SessionState::Evaluated)?;

        self.fitness
            .score(&mut self.generation, &self.buttons, &mut self.rng);

        if self
            .hall_of_fame
            .consider(&self.generation, self.generation_number)
        {
            if let Some(fitness) = self.hall_of_fame.best_fitness() {
                info!(
                    "New champion in generation {} with fitness {:.4}",
                    self.generation_number, fitness
                );
            }
        }

        self.state = SessionState::Scored;
        Ok(())
    }

    /// Play the champion once more with rendering on. The outcome is discarded.
    pub fn replay_champion<S: Simulator + ?Sized>(&self, simulator: &S) {
        let Some(champion) = self.hall_of_fame.champion() else {
            return;
        };
        let request = SimulationRequest::new(champion.actions(), self.config.level.level_id(), true);
        if let Err(e) = simulator.run(&request) {
            warn!("Champion replay failed: {}", e);
        }
    }

    /// Write the scored generation out. A write failure is logged and the
    /// session moves on regardless; the return value says whether it stuck.
    pub fn persist(&mut self, store: &GenerationStore) -> Result<bool> {
        self.expect_state(SessionState::Scored)?;

        let written = match store.persist(&self.generation, self.generation_number) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    "Could not store generation {}: {}",
                    self.generation_number, e
                );
                false
            }
        };

        self.state = SessionState::Persisted;
        Ok(written)
    }

    /// Breed the next generation, or finish once the generation cap is reached.
    pub fn advance(&mut self) -> Result<SessionState> {
        self.expect_state(SessionState::Persisted)?;

        if self.generation_number >= self.config.population.generations {
            self.state = SessionState::Done;
            return Ok(self.state);
        }

        let (next, report) = self.selection.breed(
            &self.generation,
            self.config.population.size,
            &self.crossover,
            &self.mutation,
            &self.buttons,
            &mut self.rng,
        )?;
        if report.parent_draw_deviations > 0 || report.crossover_deviations > 0 {
            warn!(
                "Generation {} bred with low diversity: {} clone pairings, {} unchanged children accepted",
                self.generation_number + 1,
                report.parent_draw_deviations,
                report.crossover_deviations
            );
        }

        self.generation = next;
        self.generation_number += 1;
        self.last_breeding = Some(report);
        self.state = SessionState::Initialized;
        Ok(self.state)
    }

    /// Drive the session until the generation cap; returns the champion.
    pub fn run<S, C>(
        &mut self,
        simulator: &S,
        store: &GenerationStore,
        callback: &mut C,
    ) -> Result<Option<Chromosome>>
    where
        S: Simulator + ?Sized,
        C: ProgressCallback + ?Sized,
    {
        if let Some(name) = self.config.session.import_file.clone() {
            if let Err(e) = self.import_generation(store, &name) {
                warn!("Import of {} failed ({}), keeping current generation", name, e);
            }
        }

        while self.state != SessionState::Done {
            callback.on_generation_start(self.generation_number);

            self.evaluate(simulator, callback)?;
            self.score()?;
            if self.config.simulator.replay_champion {
                self.replay_champion(simulator);
            }
            self.persist(store)?;

            let stats = self.generation.stats(self.config.level.time_budget());
            let best = self.hall_of_fame.best_fitness().unwrap_or(0.0);
            callback.on_generation_complete(self.generation_number, &stats, best);

            self.advance()?;
        }

        Ok(self.hall_of_fame.champion().cloned())
    }
}

fn evaluate_one<S: Simulator + ?Sized>(
    simulator: &S,
    chromosome: &mut Chromosome,
    index: usize,
    level: &str,
    render: bool,
) {
    chromosome.clear_outcome();
    let request = SimulationRequest::new(chromosome.actions(), level, render);
    match simulator.run(&request) {
        Ok(outcome) => {
            debug!(
                "Chromosome {}: x_pos {}, {}",
                index + 1,
                outcome.x_pos,
                outcome.reason_finish
            );
            chromosome.record_outcome(clamp_commands_used(outcome, chromosome.len()));
        }
        Err(e) => warn!("Simulation of chromosome {} failed: {}", index + 1, e),
    }
}

// The simulator cannot consume more actions than it was sent.
fn clamp_commands_used(mut outcome: Outcome, sent: usize) -> Outcome {
    outcome.commands_used = outcome.commands_used.min(sent);
    outcome
}
