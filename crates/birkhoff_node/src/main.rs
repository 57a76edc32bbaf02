mod services;

use anyhow::{bail, Context};
use birkhoff_samples::{
    chain, diamond, divisors, grid, labelled_powerset, pentagon, FamilySpec, DEFAULT_DIVISORS_OF,
    POWERSET_LABELS,
};
use clap::{Parser, Subcommand};
use services::{OutputFormat, PolarityArg, RunOptions};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which irreducibles to decompose along
    #[arg(long, value_enum, default_value_t = PolarityArg::Sup, global = true)]
    polarity: PolarityArg,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Run closure, distributivity, isomorphism and homomorphism checks
    #[arg(long, global = true)]
    verify: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Divisors of n ordered by divisibility
    Divisors {
        #[arg(short, long, default_value_t = DEFAULT_DIVISORS_OF,
              value_parser = clap::value_parser!(u64).range(0..=1_000_000))]
        n: u64,
    },
    /// All subsets of a small labelled set
    Powerset {
        #[arg(short, long, default_value_t = 3,
              value_parser = clap::value_parser!(u8).range(0..=POWERSET_LABELS.len() as i64))]
        size: u8,
    },
    /// The chain 0 < 1 < ... < len - 1
    Chain {
        #[arg(short, long, default_value_t = 4,
              value_parser = clap::value_parser!(u64).range(0..=256))]
        len: u64,
    },
    /// Product of two chains
    Grid {
        #[arg(short, long, default_value_t = 2,
              value_parser = clap::value_parser!(u64).range(0..=16))]
        rows: u64,
        #[arg(short, long, default_value_t = 3,
              value_parser = clap::value_parser!(u64).range(0..=16))]
        cols: u64,
    },
    /// Union/intersection closure of the sets in a JSON file
    Family {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// The non-distributive pentagon N5
    Pentagon,
    /// The non-distributive diamond M3
    Diamond,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so JSON on stdout stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let opts = RunOptions {
        format: cli.format,
        verify: cli.verify,
    };

    let passed = match cli.command {
        Commands::Divisors { n } => services::dispatch(&divisors(n), cli.polarity, &opts)?,
        Commands::Powerset { size } => {
            services::dispatch(&labelled_powerset(size as usize), cli.polarity, &opts)?
        }
        Commands::Chain { len } => services::dispatch(&chain(len), cli.polarity, &opts)?,
        Commands::Grid { rows, cols } => {
            services::dispatch(&grid(rows, cols), cli.polarity, &opts)?
        }
        Commands::Family { input } => {
            let raw = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let spec: FamilySpec = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", input.display()))?;
            info!(generators = spec.sets.len(), path = %input.display(), "loaded set family");
            services::dispatch(&spec.to_lattice(), cli.polarity, &opts)?
        }
        Commands::Pentagon => services::dispatch(&pentagon(), cli.polarity, &opts)?,
        Commands::Diamond => services::dispatch(&diamond(), cli.polarity, &opts)?,
    };

    if !passed {
        bail!("one or more diagnostics failed");
    }
    Ok(())
}
