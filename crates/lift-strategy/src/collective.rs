//! Collective control: nearest-car assignment plus SCAN direction sweeps.

use lift_core::{Car, Direction, ElevatorConfig, PassengerId, PassengerLog};

use crate::queue::FloorQueues;

/// The classic baseline dispatcher.
///
/// Hall calls are assigned to the car with the lowest estimated arrival time
/// and serviced in SCAN order: a car keeps sweeping in its current direction
/// while committed stops remain ahead of it, then reverses to the farthest
/// one behind.
#[derive(Debug)]
pub struct CollectiveControl {
    cfg:     ElevatorConfig,
    waiting: FloorQueues,
}

impl CollectiveControl {
    pub fn new(cfg: ElevatorConfig, num_floors: usize) -> Self {
        CollectiveControl { cfg, waiting: FloorQueues::new(num_floors) }
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
        let best = self.choose_car(cars, origin);
        log.get_mut(id).assigned_car = best.map(|i| cars[i].id);
        self.waiting.push_back(origin, direction, id);
        if let Some(i) = best {
            cars[i].add_stop(origin);
        }
    }

    pub fn next_stop(&mut self, car: &mut Car, _log: &PassengerLog, _now: f64) -> Option<usize> {
        if !car.pending_stops.is_empty() {
            let target = match car.direction {
                Some(Direction::Up) => car
                    .pending_stops
                    .iter()
                    .copied()
                    .filter(|&f| f as f64 >= car.current_floor)
                    .min()
                    .unwrap_or_else(|| *car.pending_stops.iter().max().expect("non-empty")),
                Some(Direction::Down) => car
                    .pending_stops
                    .iter()
                    .copied()
                    .filter(|&f| f as f64 <= car.current_floor)
                    .max()
                    .unwrap_or_else(|| *car.pending_stops.iter().min().expect("non-empty")),
                None => nearest_stop(&car.pending_stops, car.current_floor),
            };
            let pos = car
                .pending_stops
                .iter()
                .position(|&f| f == target)
                .expect("target drawn from pending stops");
            car.pending_stops.remove(pos);
            return Some(target);
        }

        // Nothing committed: chase the nearest floor with any waiter.
        let nearest = self.waiting.nearest_waiting_floor(car.current_floor)?;
        car.direction = Some(Direction::toward(car.current_floor, nearest));
        Some(nearest)
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
            let queue = self.waiting.at_mut(floor).queue_mut(direction);
            let mut remaining = std::collections::VecDeque::with_capacity(queue.len());
            while let Some(id) = queue.pop_front() {
                let assigned_here = {
                    let p = log.get(id);
                    p.assigned_car.is_none() || p.assigned_car == Some(car.id)
                };
                if car.has_capacity(self.cfg.capacity) && assigned_here {
                    let p = log.get_mut(id);
                    p.record_board(now);
                    p.assigned_car = Some(car.id);
                    let destination = p.destination;
                    car.passengers.push(id);
                    car.add_stop(destination);
                    boarded.push(id);
                } else {
                    // Full car or a call held for another car: keep waiting.
                    remaining.push_back(id);
                }
            }
            *self.waiting.at_mut(floor).queue_mut(direction) = remaining;
        }
        boarded
    }

    pub fn after_servicing_floor(
        &mut self,
        _car:  &mut Car,
        log:   &PassengerLog,
        floor: usize,
        _now:  f64,
    ) {
        self.waiting.prune_boarded(floor, log);
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// The car with the lowest estimated arrival at `origin`; ties go to the
    /// lowest id.
    fn choose_car(&self, cars: &[Car], origin: usize) -> Option<usize> {
        let mut best = None;
        let mut best_score = f64::INFINITY;
        for (i, car) in cars.iter().enumerate() {
            let score = self.estimate_arrival_time(car, origin);
            if score < best_score {
                best_score = score;
                best = Some(i);
            }
        }
        best
    }

    /// Distance to the caller, plus a door-time penalty per committed stop,
    /// plus the remainder of any in-flight move.
    fn estimate_arrival_time(&self, car: &Car, origin: usize) -> f64 {
        let mut distance = (car.current_floor - origin as f64).abs();
        if car.mode == lift_core::CarMode::Moving {
            if let Some(target) = car.target_floor {
                distance += (target as f64 - car.current_floor).abs();
            }
        }
        distance + car.pending_stops.len() as f64 * self.cfg.door_time_s
    }

    /// Boarding order: travel direction first; an idle car takes the longer
    /// queue first (up on a tie).
    fn direction_order(&self, car: &Car, floor: usize) -> [Direction; 2] {
        match car.direction {
            Some(d) => [d, d.opposite()],
            None => {
                let queues = self.waiting.at(floor);
                if queues.queue(Direction::Down).len() > queues.queue(Direction::Up).len() {
                    [Direction::Down, Direction::Up]
                } else {
                    [Direction::Up, Direction::Down]
                }
            }
        }
    }
}

/// The committed stop nearest to `from`; earliest-committed wins ties.
fn nearest_stop(stops: &[usize], from: f64) -> usize {
    let mut best = stops[0];
    let mut best_distance = f64::INFINITY;
    for &f in stops {
        let distance = (f as f64 - from).abs();
        if distance < best_distance {
            best = f;
            best_distance = distance;
        }
    }
    best
}
