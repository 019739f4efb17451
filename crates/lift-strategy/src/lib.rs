//! `lift-strategy` — pluggable dispatch strategies for the liftsim kernel.
//!
//! # The strategy contract
//!
//! Every dispatcher implements four operations plus an optional tick hook:
//!
//! | Operation               | When the kernel calls it                       |
//! |-------------------------|------------------------------------------------|
//! | `on_passenger_arrival`  | Once per registered passenger, in id order.    |
//! | `next_stop`             | When a car is idle or finishes a dwell.        |
//! | `board_passengers`      | At every stop, after disembarking.             |
//! | `after_servicing_floor` | At dwell end, before `next_stop`.              |
//! | `on_tick`               | Once per tick, before any car update.          |
//!
//! Strategies own their waiting structures outright; cars are shared with the
//! kernel and touched only through the car passed into each call.  Waiting
//! queues hold [`PassengerId`]s and dereference through the log.
//!
//! # Why an enum, not a trait object
//!
//! The four kinds are a closed set and each carries differently-shaped
//! waiting state.  A tagged variant keeps that state explicit and the
//! dispatch monomorphic; adding a strategy means adding a variant and four
//! match arms, which the compiler then exhaustively checks.

pub mod collective;
pub mod destination;
pub mod energy;
pub mod queue;
pub mod zoned;


use lift_core::{Car, LiftError, LiftResult, PassengerId, PassengerLog, SimulationConfig};

pub use collective::CollectiveControl;
pub use destination::DestinationDispatch;
pub use energy::EnergySaver;
pub use queue::{DirectionQueues, FloorQueues};
pub use zoned::ZonedDispatch;

// ── Strategy ──────────────────────────────────────────────────────────────────

/// One of the four dispatchers, carrying its own waiting state.
#[derive(Debug)]
pub enum Strategy {
    CollectiveControl(CollectiveControl),
    DestinationDispatch(DestinationDispatch),
    ZonedDispatch(ZonedDispatch),
    EnergySaver(EnergySaver),
}

impl Strategy {
    /// Every valid strategy name, in canonical order.
    pub const NAMES: [&'static str; 4] = [
        "collective_control",
        "destination_dispatch",
        "zoned_dispatch",
        "energy_saver",
    ];

    /// Construct a strategy by name.  Unknown names are fatal.
    pub fn build(name: &str, config: &SimulationConfig) -> LiftResult<Strategy> {
        let cfg = config.elevator.clone();
        match name {
            "collective_control" => Ok(Strategy::CollectiveControl(CollectiveControl::new(
                cfg,
                config.num_floors,
            ))),
            "destination_dispatch" => Ok(Strategy::DestinationDispatch(DestinationDispatch::new(
                cfg,
                config.num_floors,
            ))),
            "zoned_dispatch" => Ok(Strategy::ZonedDispatch(ZonedDispatch::new(
                cfg,
                config.num_floors,
                config.num_elevators,
            ))),
            "energy_saver" => Ok(Strategy::EnergySaver(EnergySaver::new(cfg, config.num_floors))),
            other => Err(LiftError::UnknownStrategy(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::CollectiveControl(_)   => "collective_control",
            Strategy::DestinationDispatch(_) => "destination_dispatch",
            Strategy::ZonedDispatch(_)       => "zoned_dispatch",
            Strategy::EnergySaver(_)         => "energy_saver",
        }
    }

    /// Register a newly arrived passenger, optionally pre-assigning a car.
    ///
    /// Must not touch any car's onboard list; only pending stops and the
    /// strategy's own queues.
    pub fn on_passenger_arrival(
        &mut self,
        cars: &mut [Car],
        log:  &mut PassengerLog,
        id:   PassengerId,
    ) {
        match self {
            Strategy::CollectiveControl(s)   => s.on_passenger_arrival(cars, log, id),
            Strategy::DestinationDispatch(s) => s.on_passenger_arrival(cars, log, id),
            Strategy::ZonedDispatch(s)       => s.on_passenger_arrival(cars, log, id),
            Strategy::EnergySaver(s)         => s.on_passenger_arrival(cars, log, id),
        }
    }

    /// Per-tick hook.  No current strategy uses it; reserved for proactive
    /// repositioning.
    pub fn on_tick(&mut self, _cars: &mut [Car], _now: f64) {}

    /// The next floor `car` should visit, drawn from (and removed from) its
    /// committed stops or the strategy's waiting structures.  `None` leaves
    /// the car to reposition or idle.
    pub fn next_stop(&mut self, car: &mut Car, log: &mut PassengerLog, now: f64) -> Option<usize> {
        match self {
            Strategy::CollectiveControl(s)   => s.next_stop(car, log, now),
            Strategy::DestinationDispatch(s) => s.next_stop(car, log, now),
            Strategy::ZonedDispatch(s)       => s.next_stop(car, log, now),
            Strategy::EnergySaver(s)         => s.next_stop(car, log, now),
        }
    }

    /// Board waiters at `floor` into `car`, within capacity, recording board
    /// times and extending the car's stop list with their destinations.
    /// Returns the boarded ids in boarding order.
    pub fn board_passengers(
        &mut self,
        car:   &mut Car,
        log:   &mut PassengerLog,
        floor: usize,
        now:   f64,
    ) -> Vec<PassengerId> {
        match self {
            Strategy::CollectiveControl(s)   => s.board_passengers(car, log, floor, now),
            Strategy::DestinationDispatch(s) => s.board_passengers(car, log, floor, now),
            Strategy::ZonedDispatch(s)       => s.board_passengers(car, log, floor, now),
            Strategy::EnergySaver(s)         => s.board_passengers(car, log, floor, now),
        }
    }

    /// Prune waiting structures of passengers that boarded at this stop.
    pub fn after_servicing_floor(
        &mut self,
        car:   &mut Car,
        log:   &PassengerLog,
        floor: usize,
        now:   f64,
    ) {
        match self {
            Strategy::CollectiveControl(s)   => s.after_servicing_floor(car, log, floor, now),
            Strategy::DestinationDispatch(s) => s.after_servicing_floor(car, log, floor, now),
            Strategy::ZonedDispatch(s)       => s.after_servicing_floor(car, log, floor, now),
            Strategy::EnergySaver(s)         => s.after_servicing_floor(car, log, floor, now),
        }
    }
}
