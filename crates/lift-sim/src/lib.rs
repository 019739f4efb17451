//! `lift-sim` — the tick loop kernel for the liftsim elevator simulator.
//!
//! # Per-tick phase order
//!
//! ```text
//! for tick in 0..config.duration_s:
//!   ① Arrivals — the arrival process spawns passengers for this tick;
//!                the kernel registers them (warm-up arrivals flagged
//!                discarded) and notifies the strategy one by one.
//!   ② Strategy  — the optional on_tick hook.
//!   ③ Cars      — each car advances its state machine by dt = 1 s,
//!                 in ascending car id order.
//! ```
//!
//! The only suspension anywhere is each car's `time_to_next_action`
//! countdown; when it elapses the pending transition fires.  All move
//! bookkeeping (distance, energy, direction) is charged at dispatch time, so
//! telemetry is insensitive to which tick a move happens to complete on.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                               |
//! |------------|------------------------------------------------------|
//! | `parallel` | Runs batch replications on Rayon's thread pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use lift_sim::Simulation;
//! use lift_strategy::Strategy;
//!
//! let strategy = Strategy::build("collective_control", &config)?;
//! let result = Simulation::new(config, strategy).run();
//! println!("average wait: {:.1}s", result.metrics.average_wait);
//! ```

pub mod batch;
pub mod kernel;
pub mod observer;
pub mod result;

#[cfg(test)]
mod tests;

pub use batch::{replication_seed, run_batch};
pub use kernel::Simulation;
pub use observer::{NoopObserver, SimObserver};
pub use result::{CarStats, SimulationResult};
