//! `lift-core` — foundational types for the liftsim elevator simulator.
//!
//! This crate is a dependency of every other `lift-*` crate.  It intentionally
//! has no `lift-*` dependencies and minimal external ones (`rand`,
//! `thiserror`, `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`ids`]       | `PassengerId`, `CarId`                              |
//! | [`direction`] | `Direction` (up/down travel sense)                  |
//! | [`passenger`] | `Passenger` record, `PassengerLog` ownership root   |
//! | [`car`]       | `Car` state machine record + telemetry counters     |
//! | [`config`]    | `SimulationConfig` and friends, validation          |
//! | [`rng`]       | `SimRng` — the single seeded generator per run      |
//! | [`error`]     | `LiftError`, `LiftResult`                           |

pub mod car;
pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod passenger;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use car::{Car, CarMode};
pub use config::{ArrivalConfig, ArrivalEvent, ArrivalWindow, ElevatorConfig, SimulationConfig};
pub use direction::Direction;
pub use error::{LiftError, LiftResult};
pub use ids::{CarId, PassengerId};
pub use passenger::{Passenger, PassengerLog};
pub use rng::SimRng;
