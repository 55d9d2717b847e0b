#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and prints PCG Towers rounds.

mod render;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pcg_towers_core::{Command, Difficulty, Event, GenerationConfig};
use pcg_towers_system_terrain::BiomeLookup;
use pcg_towers_world::{apply, query, World};

/// Generates a world from a seed and prints its rounds and waves.
#[derive(Debug, Parser)]
#[command(name = "pcg-towers", about = "Procedural tower defence round generator")]
struct CliArgs {
    /// Seed the world is planned from.
    #[arg(long, default_value_t = 1_576_697_224)]
    seed: u32,

    /// Difficulty that selects the tuning tables.
    #[arg(long, value_enum, default_value_t = DifficultyArg::Normal)]
    difficulty: DifficultyArg,

    /// Number of planned rounds to print.
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Number of waves to print per round, capped by the configured waves per round.
    #[arg(long)]
    waves: Option<u32>,

    /// TOML file overriding the default generation config.
    #[arg(long)]
    config: Option<PathBuf>,

    /// PNG image used as the temperature by precipitation biome lookup.
    #[arg(long)]
    biome_lookup: Option<PathBuf>,

    /// Raises the default log filter to debug.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DifficultyArg {
    Easy,
    Normal,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(value: DifficultyArg) -> Self {
        match value {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Normal => Difficulty::Normal,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Entry point for the PCG Towers command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();

    let filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let config = load_config(&args)?;
    let lookup = load_lookup(&args)?;
    let waves = args
        .waves
        .unwrap_or(config.rounds.waves_per_round)
        .min(config.rounds.waves_per_round);

    let mut world = World::new(config, lookup).context("generation config is invalid")?;
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::GenerateWorld {
            seed: args.seed,
            difficulty: args.difficulty.into(),
        },
        &mut events,
    );

    for round in 0..args.rounds {
        if round > 0 {
            apply(&mut world, Command::AdvanceRound, &mut events);
        }
        let finished = report_events(&events);
        events.clear();
        if finished {
            break;
        }
        if query::base(&world).is_none() {
            continue;
        }

        print!("{}", render::render_map(&world));
        print!("{}", render::describe_spawners(&world));
        for wave in 1..=waves {
            if wave > 1 {
                apply(&mut world, Command::NextWave, &mut events);
                events.clear();
            }
            print!("{}", render::describe_wave(&world));
        }
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<GenerationConfig> {
    let Some(path) = &args.config else {
        return Ok(GenerationConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    GenerationConfig::from_toml_str(&contents)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn load_lookup(args: &CliArgs) -> Result<BiomeLookup> {
    match &args.biome_lookup {
        Some(path) => BiomeLookup::open(path)
            .with_context(|| format!("failed to load biome lookup {}", path.display())),
        None => Ok(BiomeLookup::whittaker()),
    }
}

/// Prints the world and round events, returning `true` once the world is complete.
fn report_events(events: &[Event]) -> bool {
    let mut finished = false;
    for event in events {
        match event {
            Event::WorldGenerated {
                seed,
                difficulty,
                depth,
            } => println!("world {seed} ({}) with {depth} rounds", difficulty.name()),
            Event::RoundGenerated {
                info, biome, base, ..
            } => println!(
                "round {}: {biome:?}, temperature {:.1}, precipitation {:.1}, base ({}, {})",
                info.seed,
                info.temperature,
                info.precipitation,
                base.x(),
                base.y()
            ),
            Event::RoundRejected { info, reason } => {
                println!("round {} rejected: {reason}", info.seed);
            }
            Event::WorldCompleted { rounds } => {
                println!("world complete after {rounds} rounds");
                finished = true;
            }
            Event::WaveComposed { .. } | Event::TimeAdvanced { .. } | Event::EnemySpawned { .. } => {}
        }
    }
    finished
}
