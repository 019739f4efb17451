//! CSV report backend.
//!
//! Creates three files in the configured output directory:
//! - `summary.csv`
//! - `passengers.csv`
//! - `elevators.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use lift_sim::SimulationResult;

use crate::OutputResult;

pub const SUMMARY_FILE:    &str = "summary.csv";
pub const PASSENGERS_FILE: &str = "passengers.csv";
pub const ELEVATORS_FILE:  &str = "elevators.csv";

/// Writes batch results to the three CSV reports.
pub struct CsvReportWriter {
    summary:    Writer<File>,
    passengers: Writer<File>,
    elevators:  Writer<File>,
    finished:   bool,
}

impl CsvReportWriter {
    /// Open (or create) the three CSV files in `dir` and write header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summary = Writer::from_path(dir.join(SUMMARY_FILE))?;
        summary.write_record([
            "strategy",
            "run_index",
            "average_wait",
            "median_wait",
            "pct90_wait",
            "max_wait",
            "std_wait",
            "average_travel",
            "median_travel",
            "std_travel",
            "average_system",
            "gini_wait",
            "throughput",
            "total_passengers",
            "unfinished_passengers",
            "completion_ratio",
            "energy_per_passenger",
            "distance_per_passenger",
            "average_occupancy",
            "idle_fraction",
            "moving_fraction",
            "boarding_fraction",
            "empty_trip_fraction",
            "total_energy",
        ])?;

        let mut passengers = Writer::from_path(dir.join(PASSENGERS_FILE))?;
        passengers.write_record([
            "strategy",
            "run_index",
            "passenger_id",
            "origin",
            "destination",
            "request_time",
            "board_time",
            "exit_time",
            "wait_time",
            "travel_time",
            "system_time",
            "assigned_elevator",
            "completed",
        ])?;

        let mut elevators = Writer::from_path(dir.join(ELEVATORS_FILE))?;
        elevators.write_record([
            "strategy",
            "run_index",
            "elevator_id",
            "distance_travelled",
            "stops",
            "energy",
            "active_distance",
            "active_energy",
            "empty_distance",
            "active_empty_distance",
            "time_idle",
            "time_moving",
            "time_boarding",
            "occupancy_time",
            "passengers_moved",
        ])?;

        Ok(Self {
            summary,
            passengers,
            elevators,
            finished: false,
        })
    }

    /// Append one run's rows to all three reports.
    ///
    /// Warm-up passengers are excluded from `passengers.csv`; they exist
    /// only in the in-memory result.
    pub fn write_result(&mut self, result: &SimulationResult) -> OutputResult<()> {
        let strategy = result.strategy_name.as_str();
        let run = result.run_index.to_string();
        let m = &result.metrics;

        self.summary.write_record(&[
            strategy.to_string(),
            run.clone(),
            m.average_wait.to_string(),
            m.median_wait.to_string(),
            m.pct90_wait.to_string(),
            m.max_wait.to_string(),
            m.std_wait.to_string(),
            m.average_travel.to_string(),
            m.median_travel.to_string(),
            m.std_travel.to_string(),
            m.average_system.to_string(),
            m.gini_wait.to_string(),
            m.throughput.to_string(),
            m.total_passengers.to_string(),
            m.unfinished_passengers.to_string(),
            m.completion_ratio.to_string(),
            m.energy_per_passenger.to_string(),
            m.distance_per_passenger.to_string(),
            m.average_occupancy.to_string(),
            m.idle_fraction.to_string(),
            m.moving_fraction.to_string(),
            m.boarding_fraction.to_string(),
            m.empty_trip_fraction.to_string(),
            result.total_energy.to_string(),
        ])?;

        for p in result.passengers.iter().filter(|p| !p.discarded) {
            self.passengers.write_record(&[
                strategy.to_string(),
                run.clone(),
                p.id.0.to_string(),
                p.origin.to_string(),
                p.destination.to_string(),
                p.request_time.to_string(),
                opt_to_field(p.board_time),
                opt_to_field(p.exit_time),
                opt_to_field(p.wait_time()),
                opt_to_field(p.travel_time()),
                opt_to_field(p.system_time()),
                p.assigned_car.map(|c| c.0.to_string()).unwrap_or_default(),
                p.completed().to_string(),
            ])?;
        }

        for stats in &result.car_stats {
            self.elevators.write_record(&[
                strategy.to_string(),
                run.clone(),
                stats.car_id.0.to_string(),
                stats.distance_travelled.to_string(),
                stats.stops.to_string(),
                stats.energy.to_string(),
                stats.active_distance.to_string(),
                stats.active_energy.to_string(),
                stats.empty_distance.to_string(),
                stats.active_empty_distance.to_string(),
                stats.time_idle.to_string(),
                stats.time_moving.to_string(),
                stats.time_boarding.to_string(),
                stats.occupancy_time.to_string(),
                stats.passengers_moved.to_string(),
            ])?;
        }
        Ok(())
    }

    /// Flush and close all three files.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summary.flush()?;
        self.passengers.flush()?;
        self.elevators.flush()?;
        Ok(())
    }
}

/// Empty field for a timestamp that never happened.
fn opt_to_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
