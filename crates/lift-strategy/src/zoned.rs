//! Zoned dispatch: one contiguous floor range per car, with overflow sharing.

use lift_core::{Car, Direction, ElevatorConfig, PassengerId, PassengerLog};

use crate::queue::FloorQueues;

/// A waiter this old in a foreign queue may be stolen by an otherwise-idle
/// car from another zone.
const REASSIGNMENT_THRESHOLD_S: f64 = 60.0;

/// Dedicates each car to a floor zone; idle cars assist aged foreign calls.
///
/// Zones are a ceiling split of the floor range (the last zone absorbs any
/// remainder).  Every arrival is pre-assigned to its zone's car and queued in
/// that car's own `[floor][direction]` slot; `next_stop` serves the car's
/// committed stops strictly FIFO.
#[derive(Debug)]
pub struct ZonedDispatch {
    cfg:           ElevatorConfig,
    num_floors:    usize,
    num_elevators: usize,
    /// Half-open `[start, end)` floor span per car.
    zones: Vec<(usize, usize)>,
    /// Flat `[car][floor][direction]` waiting queues.
    waiting: Vec<FloorQueues>,
}

impl ZonedDispatch {
    pub fn new(cfg: ElevatorConfig, num_floors: usize, num_elevators: usize) -> Self {
        ZonedDispatch {
            cfg,
            num_floors,
            num_elevators,
            zones:   build_zones(num_floors, num_elevators),
            waiting: vec![FloorQueues::new(num_floors); num_elevators],
        }
    }

    pub fn on_passenger_arrival(
        &mut self,
        cars: &mut [Car],
        log:  &mut PassengerLog,
        id:   PassengerId,
    ) {
        let (origin, direction) = {
            let p = log.get(id);
            (p.origin, p.direction)
        };
        let owner = self.zone_for_floor(origin) % cars.len();
        let car = &mut cars[owner];
        log.get_mut(id).assigned_car = Some(car.id);
        self.waiting[owner].push_back(origin, direction, id);
        car.add_stop(origin);
    }

    pub fn next_stop(&mut self, car: &mut Car, log: &mut PassengerLog, now: f64) -> Option<usize> {
        if !car.pending_stops.is_empty() {
            return Some(car.pending_stops.remove(0));
        }

        // Uncommitted work inside the car's own zone queues.
        if let Some(floor) = self.waiting[car.id.index()].nearest_waiting_floor(car.current_floor) {
            car.direction = Some(Direction::toward(car.current_floor, floor));
            return Some(floor);
        }

        // Assist another zone once a request has aged past the threshold.
        if let Some(floor) = self.steal_aged_request(car, log, now) {
            car.direction = Some(Direction::toward(car.current_floor, floor));
            return Some(floor);
        }

        None
    }

    pub fn board_passengers(
        &mut self,
        car:   &mut Car,
        log:   &mut PassengerLog,
        floor: usize,
        now:   f64,
    ) -> Vec<PassengerId> {
        let order = self.direction_order(car, floor);
        let mut boarded = Vec::new();
        for direction in order {
            let queue = self.waiting[car.id.index()].at_mut(floor).queue_mut(direction);
            while car.has_capacity(self.cfg.capacity) {
                let Some(id) = queue.pop_front() else { break };
                let p = log.get_mut(id);
                p.record_board(now);
                p.assigned_car = Some(car.id);
                let destination = p.destination;
                car.passengers.push(id);
                car.add_stop(destination);
                boarded.push(id);
            }
        }
        boarded
    }

    pub fn after_servicing_floor(
        &mut self,
        car:   &mut Car,
        log:   &PassengerLog,
        floor: usize,
        _now:  f64,
    ) {
        self.waiting[car.id.index()].prune_boarded(floor, log);
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// The car owning `floor`'s zone.
    fn zone_for_floor(&self, floor: usize) -> usize {
        self.zones
            .iter()
            .position(|&(start, end)| start <= floor && floor < end)
            .unwrap_or_else(|| floor.min(self.num_elevators - 1))
    }

    /// Scan foreign queues for a head-of-line waiter past the reassignment
    /// threshold; transfer it to this car's queue, front of the line, rewrite
    /// its assignment, and make its origin the next committed stop.
    fn steal_aged_request(
        &mut self,
        car: &mut Car,
        log: &mut PassengerLog,
        now: f64,
    ) -> Option<usize> {
        for other in 0..self.num_elevators {
            if other == car.id.index() {
                continue;
            }
            for floor in 0..self.num_floors {
                for direction in Direction::BOTH {
                    let Some(&id) = self.waiting[other].at(floor).queue(direction).front() else {
                        continue;
                    };
                    if now - log.get(id).request_time < REASSIGNMENT_THRESHOLD_S {
                        continue;
                    }
                    self.waiting[other].at_mut(floor).queue_mut(direction).pop_front();
                    log.get_mut(id).assigned_car = Some(car.id);
                    self.waiting[car.id.index()].push_front(floor, direction, id);
                    car.remove_stop(floor);
                    car.pending_stops.insert(0, floor);
                    return Some(floor);
                }
            }
        }
        None
    }

    /// Travel direction first; an idle car takes the longer queue first
    /// (up on a tie).
    fn direction_order(&self, car: &Car, floor: usize) -> [Direction; 2] {
        match car.direction {
            Some(d) => [d, d.opposite()],
            None => {
                let queues = self.waiting[car.id.index()].at(floor);
                if queues.queue(Direction::Up).len() >= queues.queue(Direction::Down).len() {
                    [Direction::Up, Direction::Down]
                } else {
                    [Direction::Down, Direction::Up]
                }
            }
        }
    }
}

/// Ceiling split of `num_floors` into `num_elevators` contiguous zones; the
/// last zone absorbs the remainder.
fn build_zones(num_floors: usize, num_elevators: usize) -> Vec<(usize, usize)> {
    let zone_size = num_floors.div_ceil(num_elevators);
    let mut zones = Vec::with_capacity(num_elevators);
    let mut start = 0;
    for i in 0..num_elevators {
        let end = if i == num_elevators - 1 {
            num_floors
        } else {
            num_floors.min(start + zone_size)
        };
        zones.push((start, end));
        start = end;
    }
    zones
}

#[cfg(test)]
pub(crate) fn zone_bounds(num_floors: usize, num_elevators: usize) -> Vec<(usize, usize)> {
    build_zones(num_floors, num_elevators)
}
