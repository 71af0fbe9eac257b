use crate::engines::generation::buttons::ButtonDistribution;
use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::segmenter::{flatten_blocks, split_into_blocks};
use rand::Rng;

/// Replaces one whole block with a freshly drawn press
#[derive(Debug, Clone)]
pub struct MutationEngine {
    frequency: f64,
}

impl MutationEngine {
    pub fn new(frequency: f64) -> Self {
        Self { frequency }
    }

    /// With probability `frequency`, overwrite one uniformly chosen block.
    ///
    /// Returns whether the chromosome was changed.
    pub fn mutate<R: Rng + ?Sized>(
        &self,
        chromosome: &mut Chromosome,
        buttons: &ButtonDistribution,
        rng: &mut R,
    ) -> bool {
        if chromosome.is_empty() || rng.gen::<f64>() >= self.frequency {
            return false;
        }

        let mut blocks = split_into_blocks(chromosome.actions());
        let index = rng.gen_range(0..blocks.len());
        blocks[index] = buttons.press(rng);
        chromosome.set_actions(flatten_blocks(&blocks));
        true
    }
}
