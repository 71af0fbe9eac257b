use crate::config::{CrossoverConfig, CrossoverKind};
use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::segmenter::{flatten_blocks, split_into_blocks, Block};
use crate::error::{MarioGaError, Result};
use rand::Rng;

/// Recombines two parents at block granularity
#[derive(Debug, Clone)]
pub struct CrossoverEngine {
    config: CrossoverConfig,
}

impl CrossoverEngine {
    pub fn new(config: CrossoverConfig) -> Self {
        Self { config }
    }

    /// Produce two children from two parents, which are left untouched.
    ///
    /// With probability `1 - frequency` the children are plain copies. Callers
    /// detect that (or an ineffective swap) through `Chromosome::is_clone_of`.
    pub fn crossover<R: Rng + ?Sized>(
        &self,
        parent1: &Chromosome,
        parent2: &Chromosome,
        rng: &mut R,
    ) -> Result<(Chromosome, Chromosome)> {
        if rng.gen::<f64>() >= self.config.frequency {
            return Ok((
                Chromosome::new(parent1.actions().to_vec()),
                Chromosome::new(parent2.actions().to_vec()),
            ));
        }

        let blocks1 = split_into_blocks(parent1.actions());
        let blocks2 = split_into_blocks(parent2.actions());

        let (child1, child2) = match self.config.kind {
            CrossoverKind::OnePoint => one_point(blocks1, blocks2, self.config.one_point_rate),
            CrossoverKind::Uniform => uniform(blocks1, blocks2, self.config.uniform_rate, rng),
            CrossoverKind::MultiPoint => {
                return Err(MarioGaError::Unsupported(
                    "multi-point crossover".to_string(),
                ))
            }
        };

        Ok((
            Chromosome::new(flatten_blocks(&child1)),
            Chromosome::new(flatten_blocks(&child2)),
        ))
    }
}

/// Block index at which a parent is cut: `round(count * rate)`, at least 1.
pub fn split_index(block_count: usize, rate: f64) -> usize {
    let index = (block_count as f64 * rate).round() as usize;
    index.max(1).min(block_count)
}

/// Each child keeps its own head and takes the other parent's tail.
pub fn one_point(blocks1: Vec<Block>, blocks2: Vec<Block>, rate: f64) -> (Vec<Block>, Vec<Block>) {
    let cut1 = split_index(blocks1.len(), rate);
    let cut2 = split_index(blocks2.len(), rate);

    let mut head1 = blocks1;
    let tail1 = head1.split_off(cut1);
    let mut head2 = blocks2;
    let tail2 = head2.split_off(cut2);

    head1.extend(tail2);
    head2.extend(tail1);
    (head1, head2)
}

/// Swap aligned blocks with probability `rate`; blocks past the shorter
/// parent's length stay where they are.
pub fn uniform<R: Rng + ?Sized>(
    mut blocks1: Vec<Block>,
    mut blocks2: Vec<Block>,
    rate: f64,
    rng: &mut R,
) -> (Vec<Block>, Vec<Block>) {
    let aligned = blocks1.len().min(blocks2.len());
    for i in 0..aligned {
        if rng.gen::<f64>() < rate {
            std::mem::swap(&mut blocks1[i], &mut blocks2[i]);
        }
    }
    (blocks1, blocks2)
}
