//! Per-floor, per-direction waiting queues.
//!
//! # Why this shape
//!
//! Every strategy that tracks hall calls needs "who is waiting at floor `f`
//! to go up/down, in arrival order".  Encoding the outer mapping as a dense
//! `Vec` of length `num_floors` keeps lookups branch-free and iteration in
//! ascending floor order, which is also the tie-break order everywhere a
//! scan picks "the first best" floor.  Queues hold [`PassengerId`]s and
//! dereference through the [`PassengerLog`]; the log stays the single owner.

use std::collections::VecDeque;

use lift_core::{Direction, PassengerId, PassengerLog};

// ── DirectionQueues ───────────────────────────────────────────────────────────

/// The up/down FIFO pair at one floor.
#[derive(Debug, Clone, Default)]
pub struct DirectionQueues {
    up:   VecDeque<PassengerId>,
    down: VecDeque<PassengerId>,
}

impl DirectionQueues {
    #[inline]
    pub fn queue(&self, direction: Direction) -> &VecDeque<PassengerId> {
        match direction {
            Direction::Up   => &self.up,
            Direction::Down => &self.down,
        }
    }

    #[inline]
    pub fn queue_mut(&mut self, direction: Direction) -> &mut VecDeque<PassengerId> {
        match direction {
            Direction::Up   => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    /// Waiters across both directions.
    #[inline]
    pub fn total(&self) -> usize {
        self.up.len() + self.down.len()
    }

    #[inline]
    pub fn has_waiters(&self) -> bool {
        !self.up.is_empty() || !self.down.is_empty()
    }
}

// ── FloorQueues ───────────────────────────────────────────────────────────────

/// Dense `floor → (up, down)` waiting structure.
#[derive(Debug, Clone)]
pub struct FloorQueues {
    floors: Vec<DirectionQueues>,
}

impl FloorQueues {
    pub fn new(num_floors: usize) -> Self {
        FloorQueues { floors: vec![DirectionQueues::default(); num_floors] }
    }

    #[inline]
    pub fn at(&self, floor: usize) -> &DirectionQueues {
        &self.floors[floor]
    }

    #[inline]
    pub fn at_mut(&mut self, floor: usize) -> &mut DirectionQueues {
        &mut self.floors[floor]
    }

    /// Enqueue at the back (normal arrival order).
    pub fn push_back(&mut self, floor: usize, direction: Direction, id: PassengerId) {
        self.floors[floor].queue_mut(direction).push_back(id);
    }

    /// Enqueue at the front.  Used when a stolen request must stay first in
    /// line at its new owner.
    pub fn push_front(&mut self, floor: usize, direction: Direction, id: PassengerId) {
        self.floors[floor].queue_mut(direction).push_front(id);
    }

    /// The floor with waiters nearest to `from`; ties go to the lowest floor.
    pub fn nearest_waiting_floor(&self, from: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_distance = f64::INFINITY;
        for (floor, queues) in self.floors.iter().enumerate() {
            if !queues.has_waiters() {
                continue;
            }
            let distance = (floor as f64 - from).abs();
            if distance < best_distance {
                best = Some(floor);
                best_distance = distance;
            }
        }
        best
    }

    /// Floors that currently have at least one waiter, ascending.
    pub fn waiting_floors(&self) -> impl Iterator<Item = (usize, &DirectionQueues)> {
        self.floors
            .iter()
            .enumerate()
            .filter(|(_, q)| q.has_waiters())
    }

    /// Drop every passenger at `floor` that has already boarded a car.
    ///
    /// Called from `after_servicing_floor`: boarding marks the log entry, and
    /// this sweep keeps the waiting view consistent with it.
    pub fn prune_boarded(&mut self, floor: usize, log: &PassengerLog) {
        for direction in Direction::BOTH {
            self.floors[floor]
                .queue_mut(direction)
                .retain(|&id| log.get(id).board_time.is_none());
        }
    }
}
