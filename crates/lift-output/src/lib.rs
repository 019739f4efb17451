//! `lift-output` — tabular and structured export of batch results.
//!
//! Three CSV artifacts per batch, all keyed by `(strategy, run_index)`:
//!
//! - `summary.csv` — one row per run with the metric set and total energy.
//! - `passengers.csv` — one row per non-discarded passenger.
//! - `elevators.csv` — one row per run × car with the full telemetry.
//!
//! Plus an optional single-document JSON export carrying metrics, per-car
//! stats, and a config sub-object per run.

pub mod csv;
pub mod error;
pub mod json;

#[cfg(test)]
mod tests;

pub use csv::CsvReportWriter;
pub use error::{OutputError, OutputResult};
pub use json::export_json;
