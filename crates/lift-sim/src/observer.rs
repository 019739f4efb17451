//! Simulation observer trait for progress reporting and invariant checks.

use lift_core::{Car, PassengerLog};

/// Callbacks invoked by
/// [`run_with_observer`](crate::Simulation::run_with_observer) at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The tick-end hook sees the fleet and
/// log read-only, after every car has updated — the state the per-tick
/// invariants are stated over.
///
/// # Example — watchdog
///
/// ```rust,ignore
/// struct CapacityWatch { capacity: usize }
///
/// impl SimObserver for CapacityWatch {
///     fn on_tick_end(&mut self, _tick: u64, cars: &[Car], _log: &PassengerLog) {
///         assert!(cars.iter().all(|c| c.occupants() <= self.capacity));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before arrivals.
    fn on_tick_start(&mut self, _tick: u64, _now: f64) {}

    /// Called after every car has updated for this tick.
    fn on_tick_end(&mut self, _tick: u64, _cars: &[Car], _log: &PassengerLog) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: u64) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call the run
/// loop but don't want callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
