//! The `Simulation` struct and its tick loop.

use lift_arrivals::ArrivalProcess;
use lift_core::{
    ArrivalConfig, ArrivalWindow, Car, CarId, CarMode, Direction, PassengerLog, SimRng,
    SimulationConfig,
};
use lift_metrics::{compute_metrics, OperationalTotals};
use lift_strategy::Strategy;

use crate::{CarStats, NoopObserver, SimObserver, SimulationResult};

/// Default uniform arrival rate installed when a config has no arrival
/// section, in passengers per minute per floor per direction.
const DEFAULT_RATE_PER_MINUTE: f64 = 0.5;

// ── Simulation ────────────────────────────────────────────────────────────────

/// One replication: a fleet of cars driven by one strategy under one seeded
/// arrival stream.
///
/// The kernel owns the clock, the fleet, and the passenger log; the strategy
/// owns its waiting structures and touches cars only through the calls the
/// kernel makes on it.  Everything is strictly sequential — one tick at a
/// time, cars updated in id order within a tick.
pub struct Simulation {
    config:   SimulationConfig,
    strategy: Strategy,
    /// Tick length in seconds.  The kernel quantises to 1 s.
    dt: f64,
    rng:      SimRng,
    arrivals: ArrivalProcess,
    log:      PassengerLog,
    cars:     Vec<Car>,
    run_index: u32,
}

impl Simulation {
    /// Boot a run from a validated config: seed the generator, park the cars
    /// on their idle floors, and install the arrival process (or the default
    /// uniform profile when the config has none).
    pub fn new(config: SimulationConfig, strategy: Strategy) -> Self {
        let seed = config.random_seed.unwrap_or_else(SimRng::entropy_seed);
        let rng = SimRng::new(seed);

        let boot_floors = match &config.elevator.idle_floors {
            Some(floors) if !floors.is_empty() => floors.clone(),
            _ => vec![0],
        };
        let cars = (0..config.num_elevators)
            .map(|i| Car::new(CarId(i as u32), boot_floors[i % boot_floors.len()]))
            .collect();

        let arrival_config = config.arrivals.clone().unwrap_or_else(|| ArrivalConfig {
            windows: vec![ArrivalWindow {
                start_s: 0,
                end_s:   config.duration_s,
                up_rate_per_minute:   vec![DEFAULT_RATE_PER_MINUTE; config.num_floors],
                down_rate_per_minute: vec![DEFAULT_RATE_PER_MINUTE; config.num_floors],
            }],
            events: vec![],
        });
        let arrivals = ArrivalProcess::new(arrival_config, config.num_floors);

        Simulation {
            config,
            strategy,
            dt: 1.0,
            rng,
            arrivals,
            log: PassengerLog::new(),
            cars,
            run_index: 0,
        }
    }

    /// Tag this replication's position within its batch.
    pub fn set_run_index(&mut self, run_index: u32) {
        self.run_index = run_index;
    }

    /// Drive the configured duration and aggregate the result.
    pub fn run(&mut self) -> SimulationResult {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Like [`run`][Self::run], with observer hooks at every tick boundary.
    pub fn run_with_observer<O: SimObserver>(&mut self, observer: &mut O) -> SimulationResult {
        let duration = self.config.duration_s;
        for tick in 0..duration {
            let now = tick as f64 * self.dt;
            observer.on_tick_start(tick, now);
            self.process_arrivals(tick, now);
            self.strategy.on_tick(&mut self.cars, now);
            for i in 0..self.cars.len() {
                self.update_car(i, now);
            }
            observer.on_tick_end(tick, &self.cars, &self.log);
        }
        observer.on_sim_end(duration);
        self.collect_result()
    }

    // ── Phase ①: arrivals ─────────────────────────────────────────────────

    fn process_arrivals(&mut self, tick: u64, now: f64) {
        let spawned = self.arrivals.generate(tick, &mut self.rng);
        for mut passenger in spawned {
            if passenger.destination == passenger.origin {
                continue;
            }
            if now < self.config.warmup_s as f64 {
                passenger.discarded = true;
            }
            let id = self.log.register(passenger);
            self.strategy.on_passenger_arrival(&mut self.cars, &mut self.log, id);
        }
    }

    // ── Phase ③: car state machine ────────────────────────────────────────

    fn update_car(&mut self, i: usize, now: f64) {
        // Residency and occupancy are credited against the mode the car is
        // in when the tick starts, before any transition fires.
        self.record_operational_time(i, now);

        let car = &mut self.cars[i];
        if car.time_to_next_action > 0.0 {
            car.time_to_next_action -= self.dt;
            if car.time_to_next_action > 0.0 {
                return;
            }
        }

        match car.mode {
            CarMode::Moving => {
                let Some(target) = car.target_floor else { return };
                // Move complete: snap to the target and open the doors.
                car.current_floor = target as f64;
                car.mode = CarMode::Boarding;
                let stop_time = self.handle_floor_stop(i, target, now);
                let car = &mut self.cars[i];
                car.time_to_next_action = stop_time;
                car.total_stops += 1;
                self.add_energy(i, self.config.elevator.energy_per_stop, now);
            }
            CarMode::Boarding => {
                // Dwell complete: let the strategy tidy up, then re-dispatch.
                let floor = self.cars[i].floor();
                self.strategy.after_servicing_floor(&mut self.cars[i], &self.log, floor, now);
                match self.strategy.next_stop(&mut self.cars[i], &mut self.log, now) {
                    Some(next) => self.dispatch_to_floor(i, next, now),
                    None => self.move_to_idle_floor(i, now),
                }
            }
            CarMode::Idle => {
                match self.strategy.next_stop(&mut self.cars[i], &mut self.log, now) {
                    Some(next) => self.dispatch_to_floor(i, next, now),
                    None => self.move_to_idle_floor(i, now),
                }
            }
        }
    }

    /// Commit the car to `target`.  A same-floor target re-opens the doors;
    /// otherwise the move's full distance, energy, and direction are charged
    /// here, up front, and the countdown covers the travel time.
    fn dispatch_to_floor(&mut self, i: usize, target: usize, now: f64) {
        if target == self.cars[i].floor() {
            let car = &mut self.cars[i];
            car.mode = CarMode::Boarding;
            car.target_floor = Some(target);
            let stop_time = self.handle_floor_stop(i, target, now);
            let car = &mut self.cars[i];
            car.time_to_next_action = stop_time;
            car.total_stops += 1;
            self.add_energy(i, self.config.elevator.energy_per_stop, now);
            return;
        }

        let distance = (target as f64 - self.cars[i].current_floor).abs();
        let travel_time = distance * self.config.elevator.seconds_per_floor;
        let car = &mut self.cars[i];
        car.time_to_next_action = travel_time;
        car.mode = CarMode::Moving;
        car.target_floor = Some(target);
        car.direction = Some(Direction::toward(car.current_floor, target));
        self.record_distance(i, distance, now);
        self.add_energy(i, distance * self.config.elevator.energy_per_floor, now);
    }

    /// No work: reposition toward the car's preferred idle floor, or go
    /// quiescent where it stands.
    fn move_to_idle_floor(&mut self, i: usize, now: f64) {
        let preferred = self
            .config
            .elevator
            .idle_floors
            .as_ref()
            .filter(|floors| !floors.is_empty())
            .map(|floors| floors[i % floors.len()]);
        match preferred {
            Some(floor) if self.cars[i].floor() != floor => {
                self.dispatch_to_floor(i, floor, now);
            }
            _ => {
                let car = &mut self.cars[i];
                car.mode = CarMode::Idle;
                car.target_floor = None;
                car.direction = None;
            }
        }
    }

    /// Service a stop at `floor`: disembark, then board, then price the
    /// dwell.  Disembark strictly precedes boarding so a freed seat is
    /// available in the same stop.
    fn handle_floor_stop(&mut self, i: usize, floor: usize, now: f64) -> f64 {
        let onboard = std::mem::take(&mut self.cars[i].passengers);
        let mut remaining = Vec::with_capacity(onboard.len());
        let mut disembarked = 0usize;
        for id in onboard {
            if self.log.get(id).destination == floor {
                self.log.get_mut(id).record_exit(now);
                disembarked += 1;
            } else {
                remaining.push(id);
            }
        }
        self.cars[i].passengers = remaining;

        let boarded = self
            .strategy
            .board_passengers(&mut self.cars[i], &mut self.log, floor, now);

        let people = disembarked + boarded.len();
        self.config.elevator.door_time_s
            + people as f64 * self.config.elevator.passenger_board_time_s
    }

    // ── Telemetry ─────────────────────────────────────────────────────────

    fn record_operational_time(&mut self, i: usize, now: f64) {
        if now < self.config.warmup_s as f64 {
            return;
        }
        let dt = self.dt;
        let car = &mut self.cars[i];
        match car.mode {
            CarMode::Idle     => car.time_idle += dt,
            CarMode::Moving   => car.time_moving += dt,
            CarMode::Boarding => car.time_boarding += dt,
        }
        car.occupancy_time += dt * car.occupants() as f64;
    }

    fn record_distance(&mut self, i: usize, distance: f64, now: f64) {
        let warm = now >= self.config.warmup_s as f64;
        let car = &mut self.cars[i];
        car.total_distance += distance;
        if car.occupants() == 0 {
            car.empty_distance += distance;
        }
        if warm {
            car.active_distance += distance;
            if car.occupants() == 0 {
                car.active_empty_distance += distance;
            }
        }
    }

    fn add_energy(&mut self, i: usize, energy: f64, now: f64) {
        let warm = now >= self.config.warmup_s as f64;
        let car = &mut self.cars[i];
        car.total_energy += energy;
        if warm {
            car.active_energy += energy;
        }
    }

    // ── Aggregation ───────────────────────────────────────────────────────

    fn collect_result(&self) -> SimulationResult {
        let warm_duration =
            (self.config.duration_s.saturating_sub(self.config.warmup_s)) as f64;

        let totals = OperationalTotals {
            total_energy:   self.cars.iter().map(|c| c.active_energy).sum(),
            total_distance: self.cars.iter().map(|c| c.active_distance).sum(),
            occupancy_time: self.cars.iter().map(|c| c.occupancy_time).sum(),
            idle_time:      self.cars.iter().map(|c| c.time_idle).sum(),
            moving_time:    self.cars.iter().map(|c| c.time_moving).sum(),
            boarding_time:  self.cars.iter().map(|c| c.time_boarding).sum(),
            empty_distance: self.cars.iter().map(|c| c.active_empty_distance).sum(),
            num_elevators:  self.cars.len(),
        };
        let metrics =
            compute_metrics(self.passengers_post_warmup(), warm_duration, &totals);

        let car_stats = self
            .cars
            .iter()
            .map(|car| CarStats {
                car_id: car.id,
                distance_travelled: car.total_distance,
                stops:  car.total_stops,
                energy: car.total_energy,
                active_distance:       car.active_distance,
                active_energy:         car.active_energy,
                empty_distance:        car.empty_distance,
                active_empty_distance: car.active_empty_distance,
                time_idle:      car.time_idle,
                time_moving:    car.time_moving,
                time_boarding:  car.time_boarding,
                occupancy_time: car.occupancy_time,
                passengers_moved: self
                    .log
                    .iter()
                    .filter(|p| p.assigned_car == Some(car.id))
                    .count(),
            })
            .collect();

        SimulationResult {
            strategy_name: self.strategy.name().to_string(),
            config:     self.config.clone(),
            passengers: self.log.iter().cloned().collect(),
            metrics,
            car_stats,
            total_energy:   self.cars.iter().map(|c| c.total_energy).sum(),
            total_distance: self.cars.iter().map(|c| c.total_distance).sum(),
            run_index: self.run_index,
        }
    }

    /// The metric population: non-discarded passengers requested at or after
    /// warm-up end.
    fn passengers_post_warmup(&self) -> impl Iterator<Item = &lift_core::Passenger> {
        let warmup = self.config.warmup_s as f64;
        self.log
            .iter()
            .filter(move |p| !p.discarded && (warmup <= 0.0 || p.request_time >= warmup))
    }
}
