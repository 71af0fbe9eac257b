use mario_ga::config::{CrossoverConfig, CrossoverKind, SelectionConfig};
use mario_ga::engines::generation::selection::elite_indices;
use mario_ga::engines::generation::{
    ButtonDistribution, Chromosome, CrossoverEngine, Generation, MutationEngine, RouletteWheel,
    SelectionEngine,
};
use mario_ga::MarioGaError;
use rand::rngs::StdRng;
use rand::SeedableRng;

const FREQUENCIES: [u32; 12] = [2, 10, 20, 30, 10, 10, 3, 5, 5, 3, 1, 1];

fn scored(actions: Vec<u8>, fitness: f64) -> Chromosome {
    let mut chromosome = Chromosome::new(actions);
    chromosome.set_fitness(fitness);
    chromosome
}

fn four_parents() -> Generation {
    Generation::from_chromosomes(
        4,
        vec![
            scored(vec![1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2], 10.0),
            scored(vec![3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 4, 4], 20.0),
            scored(vec![5, 5, 5, 5, 5, 5, 6, 6, 6, 6, 6, 6], 30.0),
            scored(vec![7, 7, 7, 7, 7, 7, 8, 8, 8, 8, 8, 8], 40.0),
        ],
    )
}

fn selection(top: usize) -> SelectionEngine {
    SelectionEngine::new(&SelectionConfig {
        top,
        ..SelectionConfig::default()
    })
}

#[test]
fn test_roulette_shares_end_at_one() {
    let fitness = [3.7, 0.0, 12.25, 1e-3, 88.0, 5.5];
    let wheel = RouletteWheel::new(&fitness);
    let shares = wheel.cumulative();
    assert!(shares.windows(2).all(|pair| pair[0] <= pair[1]));
    assert!((shares[shares.len() - 1] - 1.0).abs() < 1e-9);
}

#[test]
fn test_roulette_equal_fitness_is_uniform() {
    let wheel = RouletteWheel::new(&[7.0; 5]);
    for (i, share) in wheel.cumulative().iter().enumerate() {
        assert!((share - (i + 1) as f64 / 5.0).abs() < 1e-9);
    }
}

#[test]
fn test_roulette_draw_past_last_share_picks_last() {
    let wheel = RouletteWheel::new(&[1.0, 1.0, 1.0]);
    assert_eq!(wheel.select(1.0 + 1e-12), 2);
}

#[test]
fn test_elite_is_fittest() {
    let generation = four_parents();
    let elites = elite_indices(generation.chromosomes(), 1).unwrap();
    assert_eq!(elites, vec![3]);
}

#[test]
fn test_elite_ties_keep_generation_order() {
    let generation = Generation::from_chromosomes(
        4,
        vec![
            scored(vec![1], 5.0),
            scored(vec![2], 9.0),
            scored(vec![3], 5.0),
            scored(vec![4], 9.0),
        ],
    );
    let elites = elite_indices(generation.chromosomes(), 3).unwrap();
    assert_eq!(elites, vec![1, 3, 0]);
}

#[test]
fn test_too_many_elites_is_an_error() {
    let generation = four_parents();
    let result = elite_indices(generation.chromosomes(), 5);
    assert!(matches!(result, Err(MarioGaError::Elitism(_))));
}

#[test]
fn test_next_generation_starts_with_elite() {
    let generation = four_parents();
    let buttons = ButtonDistribution::new(&FREQUENCIES).unwrap();
    let crossover = CrossoverEngine::new(CrossoverConfig {
        kind: CrossoverKind::OnePoint,
        frequency: 1.0,
        ..CrossoverConfig::default()
    });
    let mutation = MutationEngine::new(0.015);
    let mut rng = StdRng::seed_from_u64(17);

    let (next, report) = selection(1)
        .breed(&generation, 4, &crossover, &mutation, &buttons, &mut rng)
        .unwrap();

    assert_eq!(next.len(), 4);
    assert_eq!(next.chromosomes()[0].actions(), generation.chromosomes()[3].actions());
    assert!(next.chromosomes()[0].outcome().is_none());
    assert_eq!(next.chromosomes()[0].fitness(), 0.0);
    assert_eq!(report.elites, 1);
    assert_eq!(report.offspring, 3);
}

#[test]
fn test_children_come_from_distinct_parents() {
    // Every parent has two blocks, so a one-point cut at block 1 always mixes two parents.
    let generation = four_parents();
    let buttons = ButtonDistribution::new(&FREQUENCIES).unwrap();
    let crossover = CrossoverEngine::new(CrossoverConfig {
        kind: CrossoverKind::OnePoint,
        frequency: 1.0,
        ..CrossoverConfig::default()
    });
    let mutation = MutationEngine::new(0.0);
    let mut rng = StdRng::seed_from_u64(3);

    let (next, report) = selection(1)
        .breed(&generation, 4, &crossover, &mutation, &buttons, &mut rng)
        .unwrap();

    assert_eq!(report.parent_draw_deviations, 0);
    for child in &next.chromosomes()[1..] {
        let head = child.actions()[0];
        let tail = child.actions()[child.len() - 1];
        // Parent k holds actions 2k+1 and 2k+2
        assert_ne!((head - 1) / 2, (tail - 1) / 2);
        assert!(generation.iter().all(|parent| !child.is_clone_of(parent)));
    }
}

#[test]
fn test_identical_population_terminates() {
    let generation = Generation::from_chromosomes(
        4,
        (0..4).map(|_| scored(vec![1; 6], 1.0)).collect(),
    );
    let buttons = ButtonDistribution::new(&FREQUENCIES).unwrap();
    let crossover = CrossoverEngine::new(CrossoverConfig::default());
    let mutation = MutationEngine::new(0.0);
    let mut rng = StdRng::seed_from_u64(5);

    let (next, report) = selection(1)
        .breed(&generation, 4, &crossover, &mutation, &buttons, &mut rng)
        .unwrap();

    assert!(next.is_full());
    assert!(report.parent_draw_deviations > 0);
    assert!(report.crossover_deviations > 0);
}

#[test]
fn test_unimplemented_methods_are_reported() {
    let generation = four_parents();
    let buttons = ButtonDistribution::new(&FREQUENCIES).unwrap();
    let crossover = CrossoverEngine::new(CrossoverConfig::default());
    let mutation = MutationEngine::new(0.0);
    let mut rng = StdRng::seed_from_u64(1);

    let engine = SelectionEngine::new(&SelectionConfig {
        fitness_proportionate: false,
        tournament: true,
        ..SelectionConfig::default()
    });
    let result = engine.breed(&generation, 4, &crossover, &mutation, &buttons, &mut rng);
    assert!(matches!(result, Err(MarioGaError::Unsupported(_))));
}
