//! Energy saver: batch-threshold admission trading wait time for trips.

use lift_core::{Car, Direction, ElevatorConfig, PassengerId, PassengerLog};

use crate::queue::FloorQueues;

/// Seconds after which a lone waiter is served without a full batch.
const GROUPING_DELAY_S: f64 = 25.0;
/// Wait that counts as fully urgent; crossing it adds the overdue bonus.
const MAX_WAIT_S: f64 = 90.0;

/// Keeps cars parked until a floor has a worthwhile batch (or someone has
/// waited long enough), then scores candidate floors on urgency, load, and
/// travel distance.
#[derive(Debug)]
pub struct EnergySaver {
    cfg:        ElevatorConfig,
    num_floors: usize,
    waiting:    FloorQueues,
    /// `max(2, ⌈capacity · 0.35⌉)` — a batch this size always dispatches.
    min_batch_size: usize,
}

impl EnergySaver {
    pub fn new(cfg: ElevatorConfig, num_floors: usize) -> Self {
        let capacity = cfg.capacity.max(1);
        let min_batch_size = 2.max((capacity as f64 * 0.35).ceil() as usize);
        EnergySaver {
            cfg,
            num_floors,
            waiting: FloorQueues::new(num_floors),
            min_batch_size,
        }
    }

    pub fn on_passenger_arrival(
        &mut self,
        _cars: &mut [Car],
        log:   &mut PassengerLog,
        id:    PassengerId,
    ) {
        let p = log.get(id);
        let (origin, direction) = (p.origin, p.direction);
        self.waiting.push_back(origin, direction, id);
    }

    pub fn next_stop(&mut self, car: &mut Car, log: &mut PassengerLog, now: f64) -> Option<usize> {
        if !car.pending_stops.is_empty() {
            return Some(car.pending_stops.remove(0));
        }
        let candidate = self.select_candidate_floor(car, log, now)?;
        car.direction = Some(Direction::toward(car.current_floor, candidate));
        Some(candidate)
    }

    pub fn board_passengers(
        &mut self,
        car:   &mut Car,
        log:   &mut PassengerLog,
        floor: usize,
        now:   f64,
    ) -> Vec<PassengerId> {
        if !self.waiting.at(floor).has_waiters() {
            return Vec::new();
        }
        let preferred = self.preferred_direction(car, floor);
        let mut boarded = Vec::new();
        for direction in [preferred, preferred.opposite()] {
            let queue = self.waiting.at_mut(floor).queue_mut(direction);
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
        _car:  &mut Car,
        log:   &PassengerLog,
        floor: usize,
        _now:  f64,
    ) {
        self.waiting.prune_boarded(floor, log);
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// The best-scoring floor whose batching criteria are met, if any
    /// scores above zero.
    ///
    /// Eligibility: `total_waiting ≥ min_batch_size` OR the longest wait at
    /// the floor has reached the grouping delay.  Score trades urgency and
    /// load against travel distance, with a flat bonus once the longest wait
    /// is overdue.
    fn select_candidate_floor(&self, car: &Car, log: &PassengerLog, now: f64) -> Option<usize> {
        let mut best = None;
        let mut best_score = 0.0;
        for (floor, queues) in self.waiting.waiting_floors() {
            let total = queues.total();
            let oldest_wait = Direction::BOTH
                .iter()
                .flat_map(|&d| queues.queue(d).iter())
                .map(|&id| now - log.get(id).request_time)
                .fold(0.0_f64, f64::max);

            let ready = total >= self.min_batch_size || oldest_wait >= GROUPING_DELAY_S;
            if !ready {
                continue;
            }

            let urgency =
                oldest_wait / MAX_WAIT_S.max(1.0) + total as f64 / self.cfg.capacity as f64;
            let distance_penalty =
                (floor as f64 - car.current_floor).abs() / ((self.num_floors - 1).max(1) as f64);
            let mut score = urgency - 0.3 * distance_penalty;
            if oldest_wait >= MAX_WAIT_S {
                score += 1.0;
            }
            if score > best_score {
                best_score = score;
                best = Some(floor);
            }
        }
        best
    }

    /// Travel direction if it still has waiters; otherwise the majority
    /// queue, breaking ties toward the half of the building the car is in.
    fn preferred_direction(&self, car: &Car, floor: usize) -> Direction {
        if let Some(d) = car.direction {
            if !self.waiting.at(floor).queue(d).is_empty() {
                return d;
            }
        }
        let up = self.waiting.at(floor).queue(Direction::Up).len();
        let down = self.waiting.at(floor).queue(Direction::Down).len();
        if up == down {
            if car.current_floor <= (self.num_floors - 1) as f64 / 2.0 {
                Direction::Up
            } else {
                Direction::Down
            }
        } else if up > down {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}
