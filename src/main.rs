use anyhow::Context;
use clap::Parser;
use log::info;
use mario_ga::config::ConfigManager;
use mario_ga::engines::evaluation::HttpSimulator;
use mario_ga::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use mario_ga::engines::generation::segmenter::split_into_blocks;
use std::path::PathBuf;

/// Evolve controller sequences for Super Mario Bros against a simulator service
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Resume from a file in the imports directory
    #[arg(long)]
    import: Option<String>,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut manager = ConfigManager::load(args.config.as_deref());
    manager
        .update(|config| {
            if args.seed.is_some() {
                config.session.seed = args.seed;
            }
            if args.import.is_some() {
                config.session.import_file = args.import.clone();
            }
        })
        .context("Invalid command-line overrides")?;

    if args.print_config {
        println!("{}", manager.to_toml()?);
        return Ok(());
    }

    let config = manager.get();
    let simulator = HttpSimulator::new(&config.simulator).context("Failed to build simulator client")?;
    let mut engine = EvolutionEngine::new(config).context("Failed to start session")?;
    let store = engine.store();

    info!(
        "Session {} on {}, logging to {}",
        engine.session_id(),
        engine.config().level.level_id(),
        store.log_path().display()
    );

    let champion = engine
        .run(&simulator, &store, &mut ConsoleProgressCallback)
        .context("Evolution aborted")?;

    match champion {
        Some(best) => info!(
            "Best fitness {:.4} from generation {}: {} actions in {} blocks",
            best.fitness(),
            engine.hall_of_fame().generation().unwrap_or(0),
            best.len(),
            split_into_blocks(best.actions()).len()
        ),
        None => info!("No chromosome was scored"),
    }

    Ok(())
}
