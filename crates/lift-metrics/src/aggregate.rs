//! The metric aggregator: `MetricResult` and `compute_metrics`.

use lift_core::Passenger;
use serde::{Deserialize, Serialize};

// ── OperationalTotals ─────────────────────────────────────────────────────────

/// Fleet-wide post-warm-up telemetry sums, as fed to [`compute_metrics`].
///
/// All fields are the `active_*` (post-warm-up) flavors; gross cumulatives
/// stay on the per-car records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalTotals {
    pub total_energy:   f64,
    pub total_distance: f64,
    /// Passenger-seconds integrated across the fleet.
    pub occupancy_time: f64,
    pub idle_time:      f64,
    pub moving_time:    f64,
    pub boarding_time:  f64,
    pub empty_distance: f64,
    pub num_elevators:  usize,
}

// ── MetricResult ──────────────────────────────────────────────────────────────

/// The full per-run statistic set reported in summaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    pub average_wait: f64,
    pub median_wait:  f64,
    pub pct90_wait:   f64,
    pub max_wait:     f64,
    pub std_wait:     f64,
    pub average_travel: f64,
    pub median_travel:  f64,
    pub std_travel:     f64,
    pub average_system: f64,
    /// Inequality of wait times in `[0, 1]`; 0 = everyone waited equally.
    pub gini_wait: f64,
    /// Finished passengers per post-warm-up second.
    pub throughput: f64,
    pub total_passengers:      usize,
    pub unfinished_passengers: usize,
    pub completion_ratio:      f64,
    pub energy_per_passenger:   f64,
    pub distance_per_passenger: f64,
    /// Mean occupant count per car over the measured interval.
    pub average_occupancy: f64,
    pub idle_fraction:     f64,
    pub moving_fraction:   f64,
    pub boarding_fraction: f64,
    pub empty_trip_fraction: f64,
}

// ── compute_metrics ───────────────────────────────────────────────────────────

/// Aggregate the non-discarded passenger set and fleet totals for one run.
///
/// `duration_s` is the measured interval: run duration minus warm-up.
pub fn compute_metrics<'a, I>(
    passengers: I,
    duration_s: f64,
    totals:     &OperationalTotals,
) -> MetricResult
where
    I: IntoIterator<Item = &'a Passenger>,
{
    let num_elevators = totals.num_elevators.max(1) as f64;

    let mut waits   = Vec::new();
    let mut travels = Vec::new();
    let mut systems = Vec::new();
    let mut finished = 0usize;
    let mut unfinished = 0usize;

    for passenger in passengers {
        if passenger.completed() {
            finished += 1;
            if let Some(w) = passenger.wait_time() {
                waits.push(w);
            }
            if let Some(t) = passenger.travel_time() {
                travels.push(t);
            }
            if let Some(s) = passenger.system_time() {
                systems.push(s);
            }
        } else {
            unfinished += 1;
        }
    }

    waits.sort_by(f64::total_cmp);
    travels.sort_by(f64::total_cmp);
    systems.sort_by(f64::total_cmp);

    let fleet_seconds = duration_s * num_elevators;
    let total = finished + unfinished;

    MetricResult {
        average_wait: mean(&waits),
        median_wait:  percentile(&waits, 50.0),
        pct90_wait:   percentile(&waits, 90.0),
        max_wait:     waits.last().copied().unwrap_or(0.0),
        std_wait:     stddev(&waits),
        average_travel: mean(&travels),
        median_travel:  percentile(&travels, 50.0),
        std_travel:     stddev(&travels),
        average_system: mean(&systems),
        gini_wait: gini(&waits),
        throughput: ratio(finished as f64, duration_s),
        total_passengers:      finished,
        unfinished_passengers: unfinished,
        completion_ratio:      ratio(finished as f64, total as f64),
        energy_per_passenger:   ratio(totals.total_energy, finished as f64),
        distance_per_passenger: ratio(totals.total_distance, finished as f64),
        average_occupancy: ratio(totals.occupancy_time, fleet_seconds),
        idle_fraction:     ratio(totals.idle_time, fleet_seconds),
        moving_fraction:   ratio(totals.moving_time, fleet_seconds),
        boarding_fraction: ratio(totals.boarding_time, fleet_seconds),
        empty_trip_fraction: ratio(totals.empty_distance, totals.total_distance),
    }
}

// ── Sample statistics ─────────────────────────────────────────────────────────

fn ratio(numerator: f64, divisor: f64) -> f64 {
    if divisor == 0.0 { 0.0 } else { numerator / divisor }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Linearly interpolated percentile over a pre-sorted sample.
fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if pct <= 0.0 {
        return sorted[0];
    }
    if pct >= 100.0 {
        return sorted[sorted.len() - 1];
    }
    let k = (sorted.len() - 1) as f64 * pct / 100.0;
    let lo = k.floor() as usize;
    let hi = k.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] * (hi as f64 - k) + sorted[hi] * (k - lo as f64)
}

/// Gini coefficient over a pre-sorted sample, via the sorted-cumulative form
/// `(n + 1 - 2·Σᵢ cumᵢ / cumₙ) / n`.
fn gini(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let n = sorted.len() as f64;
    let mut cumulative = 0.0;
    let mut weighted_sum = 0.0;
    for &value in sorted {
        cumulative += value;
        weighted_sum += cumulative;
    }
    if cumulative == 0.0 {
        return 0.0;
    }
    (n + 1.0 - 2.0 * weighted_sum / cumulative) / n
}
