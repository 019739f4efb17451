//! `lift-arrivals` — the stochastic passenger source for the liftsim kernel.
//!
//! # Model
//!
//! At each tick the process looks up the unique
//! [`ArrivalWindow`](lift_core::ArrivalWindow) covering the current time
//! and, for every
//! `(origin floor, direction)` pair, draws a Poisson-distributed arrival
//! count at rate `rate_per_minute / 60` per tick.  Scheduled
//! [`ArrivalEvent`](lift_core::ArrivalEvent) bursts fire on top of the
//! windows at their exact tick.
//!
//! An empty configuration is valid and yields no passengers; the process
//! itself never fails.

pub mod process;


pub use process::ArrivalProcess;
