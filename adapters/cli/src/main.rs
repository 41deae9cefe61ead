#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that hosts interactive Maze Runner sessions.

mod host;
mod records;

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use log::{debug, LevelFilter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{host::Host, records::RecordStore};

#[derive(Debug, Parser)]
#[command(name = "maze-runner", about = "Find the key, open the door, reach the exit")]
struct Cli {
    /// Maze width in cells; values outside 5-10 fall back to 10.
    #[arg(long)]
    width: Option<u32>,
    /// Maze height in cells; values outside 5-10 fall back to 10.
    #[arg(long)]
    height: Option<u32>,
    /// Seed for reproducible mazes.
    #[arg(long)]
    seed: Option<u64>,
    /// File holding the best completion time.
    #[arg(long, default_value = "maze-runner-records.toml")]
    records: PathBuf,
    /// Keep the best time in memory only.
    #[arg(long)]
    no_records: bool,
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Entry point for the Maze Runner command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let rng = match cli.seed {
        Some(seed) => {
            debug!("seeding maze generation with {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };
    let records = if cli.no_records {
        RecordStore::in_memory()
    } else {
        RecordStore::load(&cli.records)?
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut host = Host::new(
        stdin.lock(),
        stdout.lock(),
        rng,
        records,
        cli.width,
        cli.height,
    );
    host.run()
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
