pub mod buttons;
pub mod chromosome;
pub mod crossover;
pub mod evolution_engine;
pub mod hall_of_fame;
pub mod mutation;
pub mod population;
pub mod progress;
pub mod segmenter;
pub mod selection;

pub use buttons::ButtonDistribution;
pub use chromosome::Chromosome;
pub use crossover::CrossoverEngine;
pub use evolution_engine::{EvolutionEngine, SessionState};
pub use hall_of_fame::HallOfFame;
pub use mutation::MutationEngine;
pub use population::{Generation, GenerationStats};
pub use progress::{ConsoleProgressCallback, ProgressCallback, SilentProgress};
pub use segmenter::{flatten_blocks, split_into_blocks, Block};
pub use selection::{BreedingReport, RouletteWheel, SelectionEngine};
