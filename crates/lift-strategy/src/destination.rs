//! Destination dispatch: origin-grouped batches bounded by capacity.

use std::collections::{BTreeMap, VecDeque};

use lift_core::{Car, ElevatorConfig, PassengerId, PassengerLog};

/// Seconds of queue age that count as much as one extra waiting passenger
/// when scoring pickup floors.
const GROUPING_WINDOW_S: f64 = 30.0;

/// Groups waiters by `(origin, destination)` and commits whole batches.
///
/// Cars carry no pre-assignment.  When one runs out of plan, the floor
/// scoring `total_waiting + age / grouping_window` highest is picked, a
/// destination group is formed greedily (longest destination queues first,
/// whole queues until the capacity's worth of seats is spoken for), and the
/// plan `[pickup, dest…]` is committed in one piece.
#[derive(Debug)]
pub struct DestinationDispatch {
    cfg: ElevatorConfig,
    /// `waiting[origin][destination]` → FIFO of waiting passengers.
    waiting: Vec<BTreeMap<usize, VecDeque<PassengerId>>>,
    /// Last time a group was formed at each floor; ages the score.
    last_group_time: Vec<f64>,
}

impl DestinationDispatch {
    pub fn new(cfg: ElevatorConfig, num_floors: usize) -> Self {
        DestinationDispatch {
            cfg,
            waiting:         vec![BTreeMap::new(); num_floors],
            last_group_time: vec![0.0; num_floors],
        }
    }

    pub fn on_passenger_arrival(
        &mut self,
        _cars: &mut [Car],
        log:   &mut PassengerLog,
        id:    PassengerId,
    ) {
        let p = log.get(id);
        let (origin, destination) = (p.origin, p.destination);
        self.waiting[origin].entry(destination).or_default().push_back(id);
    }

    pub fn next_stop(&mut self, car: &mut Car, _log: &PassengerLog, now: f64) -> Option<usize> {
        if !car.pending_stops.is_empty() {
            return Some(car.pending_stops.remove(0));
        }

        let pickup = self.best_pickup_floor(now)?;
        let group = self.form_group(pickup, now);
        if group.is_empty() {
            return None;
        }
        car.pending_stops.push(pickup);
        car.pending_stops.extend(group);
        Some(car.pending_stops.remove(0))
    }

    pub fn board_passengers(
        &mut self,
        car:   &mut Car,
        log:   &mut PassengerLog,
        floor: usize,
        now:   f64,
    ) -> Vec<PassengerId> {
        // Destinations committed after this pickup gate who may board.  With
        // an empty plan, fall back to the destinations already onboard; with
        // both empty, anyone at the floor may board.
        let mut scheduled: Vec<usize> =
            car.pending_stops.iter().copied().filter(|&s| s != floor).collect();
        if scheduled.is_empty() {
            scheduled = car.passengers.iter().map(|&id| log.get(id).destination).collect();
        }

        let mut boarded = Vec::new();
        let destinations: Vec<usize> = self.waiting[floor].keys().copied().collect();
        for destination in destinations {
            if !scheduled.is_empty() && !scheduled.contains(&destination) {
                continue;
            }
            let queue = self.waiting[floor].get_mut(&destination).expect("key just listed");
            while !queue.is_empty() && car.has_capacity(self.cfg.capacity) {
                let id = queue.pop_front().expect("checked non-empty");
                let p = log.get_mut(id);
                p.record_board(now);
                p.assigned_car = Some(car.id);
                car.passengers.push(id);
                car.add_stop(destination);
                boarded.push(id);
            }
            if queue.is_empty() {
                self.waiting[floor].remove(&destination);
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
        let dest_map = &mut self.waiting[floor];
        dest_map.retain(|_, queue| {
            queue.retain(|&id| log.get(id).board_time.is_none());
            !queue.is_empty()
        });
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    /// The floor maximising `total_waiting + age / grouping_window`.
    fn best_pickup_floor(&self, now: f64) -> Option<usize> {
        let mut best = None;
        let mut best_score = -1.0;
        for (floor, dest_map) in self.waiting.iter().enumerate() {
            let total: usize = dest_map.values().map(VecDeque::len).sum();
            if total == 0 {
                continue;
            }
            let age = now - self.last_group_time[floor];
            let score = total as f64 + age / GROUPING_WINDOW_S;
            if score > best_score {
                best_score = score;
                best = Some(floor);
            }
        }
        best
    }

    /// Admit whole destination queues, longest first, until a capacity's
    /// worth of seats is allocated.  Resets the floor's grouping age.
    fn form_group(&mut self, floor: usize, now: f64) -> Vec<usize> {
        let mut entries: Vec<(usize, usize)> = self.waiting[floor]
            .iter()
            .map(|(&dest, queue)| (dest, queue.len()))
            .collect();
        // Stable sort: equal queue lengths keep ascending-destination order.
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        let mut group = Vec::new();
        let mut seats_remaining = self.cfg.capacity;
        for (destination, len) in entries {
            if seats_remaining == 0 {
                break;
            }
            let take = len.min(seats_remaining);
            seats_remaining -= take;
            if take > 0 {
                group.push(destination);
            }
        }
        self.last_group_time[floor] = now;
        group
    }
}
