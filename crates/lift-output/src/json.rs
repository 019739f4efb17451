//! Structured single-document export.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use lift_metrics::MetricResult;
use lift_sim::{CarStats, SimulationResult};

use crate::OutputResult;

/// One run's slice of the export document.
#[derive(Serialize)]
struct ResultDocument<'a> {
    strategy:  &'a str,
    run_index: u32,
    metrics:   &'a MetricResult,
    total_energy:   f64,
    total_distance: f64,
    elevators: &'a [CarStats],
    config:    ConfigSummary,
}

/// The config sub-object: the shape of the building and the run, without the
/// full arrival tables.
#[derive(Serialize)]
struct ConfigSummary {
    num_floors:    usize,
    num_elevators: usize,
    duration_s:    u64,
    warmup_s:      u64,
}

/// Write all results as one pretty-printed JSON array.
pub fn export_json(results: &[SimulationResult], path: &Path) -> OutputResult<()> {
    let documents: Vec<ResultDocument<'_>> = results
        .iter()
        .map(|r| ResultDocument {
            strategy:  &r.strategy_name,
            run_index: r.run_index,
            metrics:   &r.metrics,
            total_energy:   r.total_energy,
            total_distance: r.total_distance,
            elevators: &r.car_stats,
            config: ConfigSummary {
                num_floors:    r.config.num_floors,
                num_elevators: r.config.num_elevators,
                duration_s:    r.config.duration_s,
                warmup_s:      r.config.warmup_s,
            },
        })
        .collect();

    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &documents)?;
    Ok(())
}
