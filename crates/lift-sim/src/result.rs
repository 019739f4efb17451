//! Plain data results produced by one simulation run.

use lift_core::{CarId, Passenger, SimulationConfig};
use lift_metrics::MetricResult;
use serde::Serialize;

/// Telemetry for one car over one run.
#[derive(Debug, Clone, Serialize)]
pub struct CarStats {
    pub car_id: CarId,
    pub distance_travelled: f64,
    pub stops:  u64,
    pub energy: f64,
    pub active_distance:       f64,
    pub active_energy:         f64,
    pub empty_distance:        f64,
    pub active_empty_distance: f64,
    pub time_idle:      f64,
    pub time_moving:    f64,
    pub time_boarding:  f64,
    pub occupancy_time: f64,
    /// Passengers that ended the run assigned to this car.
    pub passengers_moved: usize,
}

/// Everything one replication produced, keyed by `(strategy, run_index)`.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub strategy_name: String,
    pub config:     SimulationConfig,
    /// The complete passenger log in id order, warm-up passengers included
    /// (flagged `discarded`; exports filter them).
    pub passengers: Vec<Passenger>,
    pub metrics:    MetricResult,
    pub car_stats:  Vec<CarStats>,
    /// Gross fleet sums, warm-up included.
    pub total_energy:   f64,
    pub total_distance: f64,
    pub run_index: u32,
}
