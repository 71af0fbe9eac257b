pub mod traits;
pub mod level;
pub mod fitness;
pub mod evolution;
pub mod runtime;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use level::LevelConfig;
pub use fitness::{ButtonConfig, WeightConfig};
pub use evolution::{
    CrossoverConfig, CrossoverKind, MutationConfig, PopulationConfig, SelectionConfig,
    SelectionMethod,
};
pub use runtime::{SessionConfig, SimulatorConfig};
