use crate::engines::generation::population::GenerationStats;
use log::info;

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_chromosome_evaluated(&mut self, index: usize, total: usize);
    fn on_generation_complete(
        &mut self,
        generation: usize,
        stats: &GenerationStats,
        champion_fitness: f64,
    );
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        info!("Generation {} starting...", generation);
    }

    fn on_chromosome_evaluated(&mut self, index: usize, total: usize) {
        if index % 10 == 0 || index == total {
            info!("  Evaluated {}/{} chromosomes", index, total);
        }
    }

    fn on_generation_complete(
        &mut self,
        generation: usize,
        stats: &GenerationStats,
        champion_fitness: f64,
    ) {
        info!(
            "Generation {} complete. Avg pos: {:.1}, avg speed: {:.3}, avg fitness: {:.4}, best so far: {:.4}",
            generation,
            stats.average_position,
            stats.average_speed,
            stats.average_fitness,
            champion_fitness
        );
    }
}

/// Ignores every event
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_chromosome_evaluated(&mut self, _index: usize, _total: usize) {}
    fn on_generation_complete(&mut self, _: usize, _: &GenerationStats, _: f64) {}
}
