//! Simulation configuration types and validation.
//!
//! Typically deserialized from a JSON document by the application crate and
//! validated with [`SimulationConfig::validate`] before any run.  Every field
//! of the `elevator` sub-object has an individual default so partial
//! documents parse.

use serde::{Deserialize, Serialize};

use crate::{Direction, LiftError, LiftResult};

// ── ElevatorConfig ────────────────────────────────────────────────────────────

/// Physical parameters shared by every car in the fleet.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ElevatorConfig {
    /// Maximum onboard passengers per car.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Travel time across one floor, in seconds.
    #[serde(default = "default_seconds_per_floor")]
    pub seconds_per_floor: f64,
    /// Fixed door open/close overhead per stop, in seconds.
    #[serde(default = "default_door_time_s")]
    pub door_time_s: f64,
    /// Additional dwell per person moving through the doors, in seconds.
    #[serde(default = "default_passenger_board_time_s")]
    pub passenger_board_time_s: f64,
    /// Energy charged per floor travelled.
    #[serde(default = "default_energy_per_floor")]
    pub energy_per_floor: f64,
    /// Energy charged per stop (door cycle).
    #[serde(default = "default_energy_per_stop")]
    pub energy_per_stop: f64,
    /// Preferred parking floors; car `i` reposition-targets entry `i mod len`.
    /// `None` disables repositioning (cars idle where they finish).
    #[serde(default)]
    pub idle_floors: Option<Vec<usize>>,
}

fn default_capacity() -> usize { 14 }
fn default_seconds_per_floor() -> f64 { 2.5 }
fn default_door_time_s() -> f64 { 4.0 }
fn default_passenger_board_time_s() -> f64 { 1.2 }
fn default_energy_per_floor() -> f64 { 1.0 }
fn default_energy_per_stop() -> f64 { 0.5 }

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            capacity:               default_capacity(),
            seconds_per_floor:      default_seconds_per_floor(),
            door_time_s:            default_door_time_s(),
            passenger_board_time_s: default_passenger_board_time_s(),
            energy_per_floor:       default_energy_per_floor(),
            energy_per_stop:        default_energy_per_stop(),
            idle_floors:            None,
        }
    }
}

// ── Arrival configuration ─────────────────────────────────────────────────────

/// A half-open time interval `[start_s, end_s)` with per-floor arrival rates.
///
/// Both rate vectors are indexed by origin floor, in passengers per minute.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrivalWindow {
    pub start_s: u64,
    pub end_s:   u64,
    pub up_rate_per_minute:   Vec<f64>,
    pub down_rate_per_minute: Vec<f64>,
}

impl ArrivalWindow {
    /// `true` if `time` falls inside this window.
    #[inline]
    pub fn contains(&self, time: u64) -> bool {
        self.start_s <= time && time < self.end_s
    }
}

/// A scheduled burst: `count` passengers appear at `(floor, direction)` at
/// `time_s`.  Destinations are drawn uniformly from `destinations`, or from
/// the directional legal set when omitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArrivalEvent {
    pub time_s:    u64,
    pub floor:     usize,
    #[serde(default = "default_event_direction")]
    pub direction: Direction,
    pub count:     usize,
    #[serde(default)]
    pub destinations: Option<Vec<usize>>,
}

fn default_event_direction() -> Direction {
    Direction::Up
}

/// The stochastic arrival model: rate windows plus scheduled bursts.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ArrivalConfig {
    pub windows: Vec<ArrivalWindow>,
    #[serde(default)]
    pub events: Vec<ArrivalEvent>,
}

// ── SimulationConfig ──────────────────────────────────────────────────────────

/// Top-level configuration for one simulation run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of floors in the building (≥ 2).  Floors are `0..num_floors`.
    pub num_floors: usize,
    /// Fleet size (≥ 1).
    pub num_elevators: usize,
    /// Simulated seconds; the kernel runs exactly this many 1 s ticks.
    pub duration_s: u64,
    /// Initial interval excluded from reported metrics.
    #[serde(default)]
    pub warmup_s: u64,
    #[serde(default)]
    pub elevator: ElevatorConfig,
    /// `None` means the kernel installs a default uniform arrival profile.
    #[serde(default)]
    pub arrivals: Option<ArrivalConfig>,
    /// Master seed; absent means one is drawn from entropy.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl SimulationConfig {
    /// Reject structurally invalid configurations.  Fatal at load time; the
    /// kernel assumes a validated config and never re-checks mid-run.
    pub fn validate(&self) -> LiftResult<()> {
        if self.num_floors < 2 {
            return Err(LiftError::Config("building must have at least two floors".into()));
        }
        if self.num_elevators < 1 {
            return Err(LiftError::Config("simulation requires at least one elevator".into()));
        }
        if let Some(idle_floors) = &self.elevator.idle_floors {
            for &floor in idle_floors {
                if floor >= self.num_floors {
                    return Err(LiftError::Config(format!(
                        "idle floor {} outside building range 0..{}",
                        floor, self.num_floors,
                    )));
                }
            }
        }
        let Some(arrivals) = &self.arrivals else {
            return Ok(());
        };
        for window in &arrivals.windows {
            if window.up_rate_per_minute.len() != self.num_floors {
                return Err(LiftError::Config(format!(
                    "arrival window up rates ({}) must match num_floors ({})",
                    window.up_rate_per_minute.len(),
                    self.num_floors,
                )));
            }
            if window.down_rate_per_minute.len() != self.num_floors {
                return Err(LiftError::Config(format!(
                    "arrival window down rates ({}) must match num_floors ({})",
                    window.down_rate_per_minute.len(),
                    self.num_floors,
                )));
            }
        }
        for event in &arrivals.events {
            if event.floor >= self.num_floors {
                return Err(LiftError::Config(format!(
                    "arrival event floor {} outside building range 0..{}",
                    event.floor, self.num_floors,
                )));
            }
            if event.count == 0 {
                return Err(LiftError::Config("arrival event count must be positive".into()));
            }
            if let Some(destinations) = &event.destinations {
                for &dest in destinations {
                    if dest >= self.num_floors {
                        return Err(LiftError::Config(format!(
                            "arrival event destination {} outside building range 0..{}",
                            dest, self.num_floors,
                        )));
                    }
                    if dest == event.floor {
                        return Err(LiftError::Config(
                            "arrival event destination cannot equal origin floor".into(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
