//! liftsim — run elevator dispatch experiments and write tabular reports.
//!
//! ```text
//! liftsim --config office.json \
//!         --strategy collective_control --strategy energy_saver \
//!         --runs-per-strategy 5 \
//!         --output-dir results \
//!         --export-json results/results.json
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use lift_core::SimulationConfig;
use lift_output::csv::{CsvReportWriter, ELEVATORS_FILE, PASSENGERS_FILE, SUMMARY_FILE};
use lift_output::export_json;
use lift_sim::run_batch;

/// Strategies evaluated when none are named on the command line.
const DEFAULT_STRATEGIES: [&str; 2] = ["collective_control", "destination_dispatch"];

#[derive(Parser)]
#[command(name = "liftsim", about = "Run elevator simulation experiments")]
struct Args {
    /// Path to the simulation config JSON file.
    #[arg(long)]
    config: PathBuf,

    /// Strategy name to evaluate; repeatable.
    #[arg(long = "strategy", value_name = "NAME")]
    strategies: Vec<String>,

    /// Replications per strategy.
    #[arg(long, default_value_t = 3)]
    runs_per_strategy: u32,

    /// Directory receiving the three CSV reports.
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,

    /// Optional path for the structured JSON export.
    #[arg(long, value_name = "PATH")]
    export_json: Option<PathBuf>,
}

fn load_config(path: &Path) -> Result<SimulationConfig> {
    let file = File::open(path)
        .with_context(|| format!("open config {}", path.display()))?;
    let config: SimulationConfig = serde_json::from_reader(file)
        .with_context(|| format!("parse config {}", path.display()))?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load and validate the building configuration.
    let config = load_config(&args.config)?;

    // 2. Resolve the strategy list.
    let strategies: Vec<String> = if args.strategies.is_empty() {
        DEFAULT_STRATEGIES.iter().map(|s| s.to_string()).collect()
    } else {
        args.strategies.clone()
    };

    // 3. Run the batch.
    let results = run_batch(&config, &strategies, args.runs_per_strategy)?;

    // 4. Write the CSV reports.
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output dir {}", args.output_dir.display()))?;
    let mut writer = CsvReportWriter::new(&args.output_dir)?;
    for result in &results {
        writer.write_result(result)?;
    }
    writer.finish()?;

    // 5. Optional structured export.
    if let Some(path) = &args.export_json {
        export_json(&results, path)?;
        println!("Wrote JSON export to {}", path.display());
    }

    println!("Wrote summary metrics to {}", args.output_dir.join(SUMMARY_FILE).display());
    println!("Wrote passenger-level data to {}", args.output_dir.join(PASSENGERS_FILE).display());
    println!("Wrote elevator telemetry to {}", args.output_dir.join(ELEVATORS_FILE).display());

    Ok(())
}
