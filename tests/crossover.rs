use mario_ga::config::{CrossoverConfig, CrossoverKind};
use mario_ga::engines::generation::crossover::{one_point, split_index, uniform};
use mario_ga::engines::generation::{
    split_into_blocks, ButtonDistribution, Chromosome, CrossoverEngine, MutationEngine,
};
use mario_ga::MarioGaError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn blocks(runs: &[(u8, usize)]) -> Vec<Vec<u8>> {
    runs.iter().map(|&(a, n)| vec![a; n]).collect()
}

fn flat(runs: &[(u8, usize)]) -> Vec<u8> {
    blocks(runs).concat()
}

#[test]
fn test_split_index_rounds_and_clamps() {
    assert_eq!(split_index(4, 0.5), 2);
    assert_eq!(split_index(5, 0.5), 3);
    assert_eq!(split_index(3, 0.1), 1);
    assert_eq!(split_index(3, 1.0), 3);
}

#[test]
fn test_one_point_four_blocks_each() {
    let p1 = blocks(&[(1, 6), (2, 7), (3, 8), (4, 9)]);
    let p2 = blocks(&[(5, 6), (6, 7), (7, 8), (8, 9)]);

    let (c1, c2) = one_point(p1, p2, 0.5);

    assert_eq!(c1, blocks(&[(1, 6), (2, 7), (7, 8), (8, 9)]));
    assert_eq!(c2, blocks(&[(5, 6), (6, 7), (3, 8), (4, 9)]));
}

#[test]
fn test_one_point_uneven_parents() {
    let p1 = blocks(&[(1, 6), (2, 6)]);
    let p2 = blocks(&[(3, 6), (4, 6), (5, 6), (6, 6)]);

    let (c1, c2) = one_point(p1, p2, 0.5);

    assert_eq!(c1, blocks(&[(1, 6), (5, 6), (6, 6)]));
    assert_eq!(c2, blocks(&[(3, 6), (4, 6), (2, 6)]));
}

#[test]
fn test_uniform_full_rate_swaps_only_aligned_blocks() {
    let p1 = blocks(&[(1, 6), (2, 6)]);
    let p2 = blocks(&[(3, 6), (4, 6), (5, 6)]);
    let mut rng = StdRng::seed_from_u64(8);

    let (c1, c2) = uniform(p1, p2, 1.0, &mut rng);

    assert_eq!(c1, blocks(&[(3, 6), (4, 6)]));
    assert_eq!(c2, blocks(&[(1, 6), (2, 6), (5, 6)]));
}

#[test]
fn test_uniform_zero_rate_is_identity() {
    let p1 = blocks(&[(1, 6), (2, 6)]);
    let p2 = blocks(&[(3, 6), (4, 6)]);
    let mut rng = StdRng::seed_from_u64(8);

    let (c1, c2) = uniform(p1.clone(), p2.clone(), 0.0, &mut rng);

    assert_eq!(c1, p1);
    assert_eq!(c2, p2);
}

#[test]
fn test_zero_frequency_copies_parents() {
    let engine = CrossoverEngine::new(CrossoverConfig {
        frequency: 0.0,
        ..CrossoverConfig::default()
    });
    let parent1 = Chromosome::new(flat(&[(1, 6), (2, 6)]));
    let parent2 = Chromosome::new(flat(&[(3, 6), (4, 6)]));
    let mut rng = StdRng::seed_from_u64(1);

    let (c1, c2) = engine.crossover(&parent1, &parent2, &mut rng).unwrap();

    assert!(c1.is_clone_of(&parent1));
    assert!(c2.is_clone_of(&parent2));
}

#[test]
fn test_parents_are_left_untouched() {
    let engine = CrossoverEngine::new(CrossoverConfig {
        kind: CrossoverKind::OnePoint,
        frequency: 1.0,
        ..CrossoverConfig::default()
    });
    let parent1 = Chromosome::new(flat(&[(1, 6), (2, 6)]));
    let parent2 = Chromosome::new(flat(&[(3, 6), (4, 6)]));
    let before = (parent1.clone(), parent2.clone());
    let mut rng = StdRng::seed_from_u64(1);

    let (c1, c2) = engine.crossover(&parent1, &parent2, &mut rng).unwrap();

    assert_eq!((parent1, parent2), before);
    assert_eq!(c1.actions(), flat(&[(1, 6), (4, 6)]).as_slice());
    assert_eq!(c2.actions(), flat(&[(3, 6), (2, 6)]).as_slice());
}

#[test]
fn test_multi_point_is_unsupported() {
    let engine = CrossoverEngine::new(CrossoverConfig {
        kind: CrossoverKind::MultiPoint,
        multi_point_min: 0.2,
        multi_point_max: 0.8,
        frequency: 1.0,
        ..CrossoverConfig::default()
    });
    let parent = Chromosome::new(vec![1; 6]);
    let mut rng = StdRng::seed_from_u64(1);

    let result = engine.crossover(&parent, &parent, &mut rng);
    assert!(matches!(result, Err(MarioGaError::Unsupported(_))));
}

#[test]
fn test_mutation_replaces_exactly_one_block() {
    let mut frequencies = [0; 12];
    frequencies[11] = 100;
    let buttons = ButtonDistribution::new(&frequencies).unwrap();
    let original = blocks(&[(1, 6), (2, 7), (3, 8)]);
    let mut chromosome = Chromosome::new(original.concat());
    let mut rng = StdRng::seed_from_u64(21);

    assert!(MutationEngine::new(1.0).mutate(&mut chromosome, &buttons, &mut rng));

    let mutated = split_into_blocks(chromosome.actions());
    assert_eq!(mutated.len(), 3);
    let replaced: Vec<usize> = (0..3).filter(|&i| mutated[i] != original[i]).collect();
    assert_eq!(replaced.len(), 1);
    let block = &mutated[replaced[0]];
    assert!(block.iter().all(|&a| a == 11));
    assert!((6..=10).contains(&block.len()));
}

#[test]
fn test_zero_mutation_rate_passes_through() {
    let buttons = ButtonDistribution::new(&[2, 10, 20, 30, 10, 10, 3, 5, 5, 3, 1, 1]).unwrap();
    let mut chromosome = Chromosome::new(flat(&[(1, 6), (2, 7)]));
    let before = chromosome.clone();
    let mut rng = StdRng::seed_from_u64(21);

    assert!(!MutationEngine::new(0.0).mutate(&mut chromosome, &buttons, &mut rng));
    assert_eq!(chromosome, before);
}
