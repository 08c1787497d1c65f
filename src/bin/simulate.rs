//! Luckroll headless balance simulator.
//!
//! Plays the dice economy without any UI through the same session driver a
//! real host uses, then prints aggregate statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]

use clap::Parser;
use luckroll::core::{now_ms, EconomyConfig};
use luckroll::simulator::{run_simulation, SimConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// CLI arguments for the simulator.
#[derive(Debug, Parser)]
#[command(name = "simulate")]
#[command(about = "Luckroll headless balance simulator", long_about = None)]
struct Args {
    /// Number of runs, each seeded `seed + i`.
    #[arg(long, default_value = "10")]
    runs: u32,

    /// Base RNG seed (defaults to the current time).
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds per run.
    #[arg(long, default_value = "3600")]
    seconds: u64,

    /// Fixed step between session ticks, in ms.
    #[arg(long, default_value = "100")]
    tick_ms: u64,

    /// Manual rolls per tick (0 = idle only).
    #[arg(long, default_value = "1")]
    manual_rolls: u32,

    /// Prestige whenever a reset would award luck.
    #[arg(long)]
    prestige: bool,

    /// Economy config JSON file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the report as JSON.
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    let economy = match &args.config {
        Some(path) => match EconomyConfig::load(path) {
            Ok(economy) => economy,
            Err(e) => {
                error!(error = %e, "cannot load economy config");
                return ExitCode::FAILURE;
            }
        },
        None => EconomyConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(|| now_ms().unsigned_abs());
    let config = SimConfig {
        num_runs: args.runs,
        seed: Some(seed),
        duration_seconds: args.seconds,
        tick_ms: args.tick_ms,
        manual_rolls_per_tick: args.manual_rolls,
        simulate_prestige: args.prestige,
        economy,
    };

    info!(
        runs = config.num_runs,
        seed,
        seconds = config.duration_seconds,
        tick_ms = config.tick_ms,
        "starting simulation"
    );
    let report = run_simulation(&config);

    if args.json {
        println!("{}", report.to_json());
    } else {
        print!("{}", report.to_text());
        println!("Seed: {seed}");
    }
    ExitCode::SUCCESS
}
