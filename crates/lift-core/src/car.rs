//! Per-car state: position, mode, pending stops, onboard list, telemetry.

use crate::{CarId, Direction, PassengerId};

// ── CarMode ───────────────────────────────────────────────────────────────────

/// The three states of a car's tick-driven state machine.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CarMode {
    Idle,
    Moving,
    Boarding,
}

// ── Car ───────────────────────────────────────────────────────────────────────

/// The full state of one elevator car.
///
/// `current_floor` is an `f64` because a car boots on a whole floor but the
/// position field stays fractional-capable for transient interpolation; the
/// kernel snaps it to the target floor when a move completes.  Outside a
/// single tick's transition, `direction.is_none()` iff `mode == Idle`.
///
/// The `active_*` counters are the post-warm-up subset of their gross
/// counterparts and feed reported metrics; gross counters always accrue.
#[derive(Debug, Clone)]
pub struct Car {
    pub id:            CarId,
    pub current_floor: f64,
    pub target_floor:  Option<usize>,
    pub direction:     Option<Direction>,
    pub mode:          CarMode,
    /// Seconds remaining in the current atomic action (move or dwell).
    pub time_to_next_action: f64,
    /// Onboard passengers, in boarding order.
    pub passengers: Vec<PassengerId>,
    /// Floors committed to visit.  Collective and zoned keep this
    /// duplicate-free; destination dispatch may front-load the pickup floor.
    pub pending_stops: Vec<usize>,

    // Gross cumulative telemetry (includes warm-up).
    pub total_distance: f64,
    pub total_stops:    u64,
    pub total_energy:   f64,
    pub empty_distance: f64,

    // Post-warm-up subset used for reported metrics.
    pub active_distance:       f64,
    pub active_energy:         f64,
    pub active_empty_distance: f64,

    // Post-warm-up mode residency and occupancy integral.
    pub time_idle:      f64,
    pub time_moving:    f64,
    pub time_boarding:  f64,
    /// Integral of occupant count over time (passenger-seconds).
    pub occupancy_time: f64,
}

impl Car {
    /// A car booted idle at `floor` with zeroed telemetry.
    pub fn new(id: CarId, floor: usize) -> Self {
        Car {
            id,
            current_floor: floor as f64,
            target_floor:  None,
            direction:     None,
            mode:          CarMode::Idle,
            time_to_next_action: 0.0,
            passengers:    Vec::new(),
            pending_stops: Vec::new(),
            total_distance: 0.0,
            total_stops:    0,
            total_energy:   0.0,
            empty_distance: 0.0,
            active_distance:       0.0,
            active_energy:         0.0,
            active_empty_distance: 0.0,
            time_idle:      0.0,
            time_moving:    0.0,
            time_boarding:  0.0,
            occupancy_time: 0.0,
        }
    }

    /// The whole floor the car is at (or nearest to, mid-move).
    #[inline]
    pub fn floor(&self) -> usize {
        self.current_floor.round() as usize
    }

    /// Append `floor` to the stop list unless already committed.
    pub fn add_stop(&mut self, floor: usize) {
        if !self.pending_stops.contains(&floor) {
            self.pending_stops.push(floor);
        }
    }

    /// Drop every committed stop at `floor`.
    pub fn remove_stop(&mut self, floor: usize) {
        self.pending_stops.retain(|&f| f != floor);
    }

    #[inline]
    pub fn has_capacity(&self, capacity: usize) -> bool {
        self.passengers.len() < capacity
    }

    #[inline]
    pub fn occupants(&self) -> usize {
        self.passengers.len()
    }

    /// Fully quiescent: no mode, no target, no committed work.
    pub fn is_idle(&self) -> bool {
        self.mode == CarMode::Idle && self.pending_stops.is_empty() && self.target_floor.is_none()
    }
}
