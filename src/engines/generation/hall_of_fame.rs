use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::population::Generation;

/// Best chromosome seen across the whole session
///
/// Holds its own copy, so it survives the generation it came from being
/// replaced. Fitness never decreases.
#[derive(Debug, Clone, Default)]
pub struct HallOfFame {
    champion: Option<Chromosome>,
    generation: usize,
}

impl HallOfFame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer every member of a scored generation.
    ///
    /// The first chromosome ever offered is adopted unconditionally; after
    /// that only a strictly higher fitness replaces the champion, so the
    /// earliest of several equal bests is kept. Returns whether it changed.
    pub fn consider(&mut self, generation: &Generation, generation_number: usize) -> bool {
        let mut changed = false;
        for chromosome in generation.iter() {
            let better = match &self.champion {
                None => true,
                Some(current) => chromosome.fitness() > current.fitness(),
            };
            if better {
                self.champion = Some(chromosome.clone());
                self.generation = generation_number;
                changed = true;
            }
        }
        changed
    }

    pub fn champion(&self) -> Option<&Chromosome> {
        self.champion.as_ref()
    }

    /// Generation number the current champion was scored in
    pub fn generation(&self) -> Option<usize> {
        self.champion.as_ref().map(|_| self.generation)
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.champion.as_ref().map(Chromosome::fitness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(actions: Vec<u8>, fitness: f64) -> Chromosome {
        let mut c = Chromosome::new(actions);
        c.set_fitness(fitness);
        c
    }

    #[test]
    fn test_first_chromosome_adopted_then_only_strictly_better() {
        let mut hof = HallOfFame::new();
        let first = Generation::from_chromosomes(
            3,
            vec![scored(vec![1], 0.0), scored(vec![2], 0.0), scored(vec![3], 0.0)],
        );
        assert!(hof.consider(&first, 1));
        assert_eq!(hof.champion().unwrap().actions(), &[1]);

        let second = Generation::from_chromosomes(2, vec![scored(vec![4], 5.0), scored(vec![5], 5.0)]);
        assert!(hof.consider(&second, 2));
        assert_eq!(hof.champion().unwrap().actions(), &[4]);
        assert_eq!(hof.generation(), Some(2));

        let worse = Generation::from_chromosomes(1, vec![scored(vec![6], 4.0)]);
        assert!(!hof.consider(&worse, 3));
        assert_eq!(hof.best_fitness(), Some(5.0));
    }
}
