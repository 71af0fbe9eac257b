use crate::config::WeightConfig;
use crate::engines::generation::buttons::ButtonDistribution;
use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::population::Generation;
use crate::types::{FinishReason, Outcome};
use log::debug;
use rand::Rng;

/// Stand-in for a zero generation average when deriving normalisation factors
pub const ZERO_AVERAGE_GUARD: f64 = 0.001;

/// Generation-wide normalisation, computed once before scoring any member
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessFactors {
    pub coins: f64,
    pub score: f64,
    pub speed: f64,
    pub position: f64,
}

/// Scores a generation and reshapes each sequence based on how its run ended
#[derive(Debug, Clone)]
pub struct FitnessEngine {
    weights: WeightConfig,
    time_budget: f64,
}

impl FitnessEngine {
    pub fn new(weights: WeightConfig, time_budget: f64) -> Self {
        Self {
            weights,
            time_budget,
        }
    }

    pub fn factors(&self, generation: &Generation) -> FitnessFactors {
        let coins = generation.average_coins();
        let score = generation.average_score();
        let speed = generation.average_speed(self.time_budget);
        let position = generation.average_position();

        let total = coins * f64::from(self.weights.coin)
            + score * f64::from(self.weights.score)
            + speed * f64::from(self.weights.speedrun)
            + position * self.weights.position();

        let factor = |average: f64| {
            let average = if average == 0.0 { ZERO_AVERAGE_GUARD } else { average };
            total / average
        };

        FitnessFactors {
            coins: factor(coins),
            score: factor(score),
            speed: factor(speed),
            position: factor(position),
        }
    }

    /// Fitness of a single outcome under the given factors; never NaN.
    pub fn fitness_of(&self, outcome: &Outcome, factors: &FitnessFactors) -> f64 {
        let mut fitness = f64::from(outcome.coins) * factors.coins * f64::from(self.weights.coin)
            + outcome.score as f64 * factors.score * f64::from(self.weights.score)
            + outcome.speed(self.time_budget) * factors.speed * f64::from(self.weights.speedrun)
            + outcome.x_pos * factors.position * self.weights.position();

        if outcome.flag_get {
            fitness += fitness * 2.0;
        }
        if fitness.is_nan() {
            0.0
        } else {
            fitness
        }
    }

    /// Assign fitness to every member, then trim or extend its actions.
    ///
    /// Members without an outcome score 0 and keep their actions as they are.
    pub fn score<R: Rng + ?Sized>(
        &self,
        generation: &mut Generation,
        buttons: &ButtonDistribution,
        rng: &mut R,
    ) {
        let factors = self.factors(generation);
        debug!("Fitness factors: {:?}", factors);

        for chromosome in generation.chromosomes_mut() {
            let fitness = match chromosome.outcome() {
                Some(outcome) => self.fitness_of(outcome, &factors),
                None => 0.0,
            };
            chromosome.set_fitness(fitness);
            reshape(chromosome, buttons, rng);
        }
    }
}

/// Drop the unused tail of a finished run, or give an exhausted one more to play.
pub fn reshape<R: Rng + ?Sized>(
    chromosome: &mut Chromosome,
    buttons: &ButtonDistribution,
    rng: &mut R,
) {
    let (reason, used) = match chromosome.outcome() {
        Some(outcome) => (outcome.reason_finish.clone(), outcome.commands_used),
        None => return,
    };
    match reason {
        FinishReason::Win | FinishReason::Death => {
            // Never below one action, even when the run ended on the first frame.
            chromosome.truncate(used.clamp(1, chromosome.len().max(1)));
        }
        FinishReason::NoMoreCommands => {
            let more = buttons.burst(rng);
            chromosome.extend_actions(&more);
        }
        FinishReason::Other(_) => {}
    }
}
