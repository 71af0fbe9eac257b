use crate::engines::generation::segmenter::Block;
use crate::error::{MarioGaError, Result};
use crate::types::{Action, ACTION_COUNT};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use std::ops::RangeInclusive;

/// How many frames a single press is held
pub const PRESS_FRAMES: RangeInclusive<usize> = 6..=10;

/// How many presses a freshly generated burst contains
pub const BURST_PRESSES: RangeInclusive<usize> = 100..=200;

/// Draws action codes according to the configured button frequencies
#[derive(Debug, Clone)]
pub struct ButtonDistribution {
    weights: WeightedIndex<u32>,
}

impl ButtonDistribution {
    pub fn new(frequencies: &[u32; ACTION_COUNT]) -> Result<Self> {
        let weights = WeightedIndex::new(frequencies.iter().copied()).map_err(|e| {
            MarioGaError::Configuration(format!("Invalid button frequencies: {}", e))
        })?;
        Ok(Self { weights })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Action {
        // Index is bounded by ACTION_COUNT
        self.weights.sample(rng) as Action
    }

    /// One sustained press: a sampled action repeated 6 to 10 times.
    pub fn press<R: Rng + ?Sized>(&self, rng: &mut R) -> Block {
        let action = self.sample(rng);
        let frames = rng.gen_range(PRESS_FRAMES);
        vec![action; frames]
    }

    /// A run of 100 to 200 presses.
    pub fn burst<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Action> {
        let presses = rng.gen_range(BURST_PRESSES);
        let mut actions = Vec::with_capacity(presses * PRESS_FRAMES.end());
        for _ in 0..presses {
            actions.extend(self.press(rng));
        }
        actions
    }
}

// (action, frames) pairs of the hand-made opening run for 1-1.
#[rustfmt::skip]
const BASELINE_RUNS: &[(Action, usize)] = &[
    (1, 6), (2, 13), (10, 10), (1, 8), (3, 8), (10, 9), (2, 7), (3, 9), (2, 7), (10, 8),
    (4, 6), (2, 6), (10, 13), (4, 8), (2, 8), (1, 8), (2, 7), (9, 6), (2, 8), (3, 20), (10, 7),
    (4, 6), (10, 7), (3, 12), (10, 6), (3, 8), (1, 6), (2, 7), (3, 21), (1, 15), (2, 26),
    (10, 7), (1, 8), (2, 7), (1, 8), (3, 8), (1, 6), (4, 8), (3, 8), (2, 16), (1, 14), (10, 7),
    (3, 9), (10, 7), (3, 26), (10, 7), (3, 9), (2, 9), (4, 6), (2, 6), (3, 7), (10, 9), (8, 7),
    (2, 8), (3, 19), (1, 7), (3, 8), (4, 6), (2, 6), (3, 8), (10, 10), (1, 8), (3, 16), (2, 9),
    (10, 7), (1, 7), (3, 15), (1, 16), (3, 8), (2, 7), (9, 7), (10, 6), (2, 7), (1, 7), (4, 6),
    (3, 6), (2, 6), (3, 8), (8, 8), (1, 15), (2, 8), (3, 6), (2, 16), (3, 6), (2, 6), (4, 8),
    (3, 7), (2, 8), (3, 8), (1, 7), (3, 8), (10, 7), (4, 7), (2, 7), (1, 7), (10, 8), (1, 13),
    (3, 14), (2, 15), (10, 7), (1, 7), (3, 9), (4, 9), (2, 14), (3, 7), (10, 15), (3, 7),
    (10, 9), (3, 9), (2, 12), (10, 12), (2, 13), (1, 7), (3, 9), (2, 22), (1, 6), (10, 8),
    (9, 7), (10, 7), (1, 16), (2, 6), (10, 6), (1, 2),
];

/// Fixed sequence seeded into slot 0 of a fresh session, so every run has
/// the same reference chromosome to compare against.
pub fn baseline_actions() -> Vec<Action> {
    BASELINE_RUNS
        .iter()
        .flat_map(|&(action, frames)| std::iter::repeat(action).take(frames))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_frequency_button_never_drawn() {
        let mut frequencies = [0; ACTION_COUNT];
        frequencies[3] = 60;
        frequencies[7] = 40;
        let dist = ButtonDistribution::new(&frequencies).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let action = dist.sample(&mut rng);
            assert!(action == 3 || action == 7);
        }
    }

    #[test]
    fn test_burst_is_made_of_presses() {
        let dist = ButtonDistribution::new(&[2, 10, 20, 30, 10, 10, 3, 5, 5, 3, 1, 1]).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let burst = dist.burst(&mut rng);
        assert!(burst.len() >= 100 * 6);
        assert!(burst.len() <= 200 * 10);
        assert!(burst.iter().all(|&a| usize::from(a) < ACTION_COUNT));
    }

    #[test]
    fn test_all_zero_frequencies_rejected() {
        assert!(ButtonDistribution::new(&[0; ACTION_COUNT]).is_err());
    }

    #[test]
    fn test_baseline_length() {
        let baseline = baseline_actions();
        assert_eq!(baseline.len(), 1128);
        assert_eq!(&baseline[..7], &[1, 1, 1, 1, 1, 1, 2]);
    }
}
