//! The `Passenger` record and the `PassengerLog` that owns every one of them.
//!
//! # Ownership model
//!
//! A passenger is referenced from several places over its lifetime: a
//! strategy's waiting queue, a car's onboard list, and the global log.  To
//! avoid aliasing, the log is the single owner; every other container holds a
//! [`PassengerId`] and dereferences through the log.  Derived timings (wait,
//! travel, system) are computed on demand from the authoritative timestamps
//! instead of being cached alongside them.

use serde::Serialize;

use crate::{CarId, Direction, PassengerId};

// ── Passenger ─────────────────────────────────────────────────────────────────

/// One passenger journey, from hall call to exit.
///
/// Terminal state is `exit_time.is_some()`.  The kernel sets `id` when the
/// passenger is registered and `exit_time` at disembark; a strategy sets
/// `assigned_car` and `board_time`; nothing else mutates the record.
#[derive(Debug, Clone, Serialize)]
pub struct Passenger {
    pub id:           PassengerId,
    pub origin:       usize,
    pub destination:  usize,
    pub request_time: f64,
    pub direction:    Direction,
    pub assigned_car: Option<CarId>,
    pub board_time:   Option<f64>,
    pub exit_time:    Option<f64>,
    /// Arrived during warm-up; excluded from reported metrics and exports.
    pub discarded:    bool,
    /// Spawned by a scheduled [`ArrivalEvent`](crate::ArrivalEvent) burst.
    pub from_event:   bool,
}

impl Passenger {
    /// A freshly spawned passenger, not yet registered (`id == INVALID`).
    pub fn new(origin: usize, destination: usize, request_time: f64, direction: Direction) -> Self {
        Passenger {
            id: PassengerId::INVALID,
            origin,
            destination,
            request_time,
            direction,
            assigned_car: None,
            board_time:   None,
            exit_time:    None,
            discarded:    false,
            from_event:   false,
        }
    }

    #[inline]
    pub fn record_board(&mut self, time: f64) {
        self.board_time = Some(time);
    }

    #[inline]
    pub fn record_exit(&mut self, time: f64) {
        self.exit_time = Some(time);
    }

    #[inline]
    pub fn completed(&self) -> bool {
        self.exit_time.is_some()
    }

    /// Seconds between hall call and boarding.  `None` until boarded.
    #[inline]
    pub fn wait_time(&self) -> Option<f64> {
        self.board_time.map(|b| b - self.request_time)
    }

    /// Seconds spent inside the car.  `None` until the journey completes.
    #[inline]
    pub fn travel_time(&self) -> Option<f64> {
        match (self.board_time, self.exit_time) {
            (Some(b), Some(e)) => Some(e - b),
            _ => None,
        }
    }

    /// Total seconds in the system, hall call to exit.
    #[inline]
    pub fn system_time(&self) -> Option<f64> {
        self.exit_time.map(|e| e - self.request_time)
    }
}

// ── PassengerLog ──────────────────────────────────────────────────────────────

/// Append-only store of every passenger spawned in one replication.
///
/// `PassengerId` doubles as the index into the backing `Vec`, so lookups are
/// O(1) and ids are dense and monotonically increasing in arrival order.
#[derive(Debug, Default)]
pub struct PassengerLog {
    entries: Vec<Passenger>,
}

impl PassengerLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spawned passenger: assign the next id and take ownership.
    pub fn register(&mut self, mut passenger: Passenger) -> PassengerId {
        let id = PassengerId(self.entries.len() as u32);
        passenger.id = id;
        self.entries.push(passenger);
        id
    }

    #[inline]
    pub fn get(&self, id: PassengerId) -> &Passenger {
        &self.entries[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: PassengerId) -> &mut Passenger {
        &mut self.entries[id.index()]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Passenger> {
        self.entries.iter()
    }

    /// Consume the log, yielding the records in id order.
    pub fn into_vec(self) -> Vec<Passenger> {
        self.entries
    }
}
