#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line driver that samples storm genesis for one or more basins.
//!
//! Every basin-year is written to stdout as one JSON object per line.

use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use storm_genesis_core::{Basin, GenesisSample};
use storm_genesis_system_basin::{BasinGenesis, Config};
use storm_genesis_system_count::{self as count, CountStrategy};
use storm_genesis_tables::ResourcePaths;

/// Samples annual tropical cyclone counts and genesis times per basin.
#[derive(Debug, Parser)]
#[command(name = "storm-genesis", version)]
struct Args {
    /// Basin code to sample (EP, NA, NI, SI, SP, WP). Repeat for several
    /// basins; every basin is sampled when omitted.
    #[arg(long = "basin", value_name = "CODE")]
    basins: Vec<Basin>,

    /// Number of years to sample per basin.
    #[arg(long, default_value_t = 1)]
    years: u32,

    /// Seed for a reproducible random stream.
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding the genesis tables instead of the bundled ones.
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Draw each storm count with a single Poisson sample.
    #[arg(long)]
    direct: bool,
}

#[derive(Serialize)]
struct YearRecord<'a> {
    year: u32,
    basin_index: usize,
    #[serde(flatten)]
    sample: &'a GenesisSample,
}

/// Entry point for the storm genesis command-line interface.
fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = Args::parse();

    let resources = args
        .data_dir
        .as_ref()
        .map_or_else(ResourcePaths::bundled, ResourcePaths::from_dir);
    let strategy = if args.direct {
        CountStrategy::Direct
    } else {
        CountStrategy::default()
    };
    let config = Config::new(resources, count::Config::new(strategy));
    let mut genesis = BasinGenesis::load(&config).context("failed to load genesis tables")?;

    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let basins = if args.basins.is_empty() {
        Basin::ALL.to_vec()
    } else {
        args.basins
    };

    let mut out = BufWriter::new(io::stdout().lock());
    for year in 0..args.years {
        for &basin in &basins {
            let sample = genesis
                .sample_basin(basin, &mut rng)
                .with_context(|| format!("failed to sample {basin} for year {year}"))?;
            let record = YearRecord {
                year,
                basin_index: sample.basin_index(),
                sample: &sample,
            };
            serde_json::to_writer(&mut out, &record).context("failed to encode sample")?;
            writeln!(out).context("failed to write sample")?;
        }
    }
    out.flush().context("failed to flush samples")?;

    log::info!(
        "sampled {} basin-years across {} basins",
        u64::from(args.years) * basins.len() as u64,
        basins.len()
    );
    Ok(())
}
