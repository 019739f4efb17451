//! Integration tests for the simulation kernel.

use lift_core::{
    ArrivalConfig, ArrivalEvent, ArrivalWindow, Car, CarMode, Direction, ElevatorConfig,
    PassengerLog, SimulationConfig,
};
use lift_strategy::Strategy;

use crate::{replication_seed, run_batch, SimObserver, Simulation};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn base_config(num_floors: usize, num_elevators: usize, duration_s: u64) -> SimulationConfig {
    SimulationConfig {
        num_floors,
        num_elevators,
        duration_s,
        warmup_s:    0,
        elevator:    ElevatorConfig::default(),
        arrivals:    None,
        random_seed: Some(101),
    }
}

fn quiet_windows(num_floors: usize, end_s: u64) -> Vec<ArrivalWindow> {
    vec![ArrivalWindow {
        start_s: 0,
        end_s,
        up_rate_per_minute:   vec![0.0; num_floors],
        down_rate_per_minute: vec![0.0; num_floors],
    }]
}

fn busy_windows(num_floors: usize, end_s: u64, rate: f64) -> Vec<ArrivalWindow> {
    vec![ArrivalWindow {
        start_s: 0,
        end_s,
        up_rate_per_minute:   vec![rate; num_floors],
        down_rate_per_minute: vec![rate; num_floors],
    }]
}

fn run_strategy(config: &SimulationConfig, name: &str) -> crate::SimulationResult {
    let strategy = Strategy::build(name, config).unwrap();
    Simulation::new(config.clone(), strategy).run()
}

// ── Boundaries ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod boundaries {
    use super::*;

    #[test]
    fn empty_arrival_configuration_idles_the_fleet() {
        let mut config = base_config(5, 2, 120);
        config.arrivals = Some(ArrivalConfig { windows: vec![], events: vec![] });
        let result = run_strategy(&config, "collective_control");

        assert!(result.passengers.is_empty());
        assert_eq!(result.total_distance, 0.0);
        assert_eq!(result.total_energy, 0.0);
        for stats in &result.car_stats {
            assert_eq!(stats.time_idle, 120.0);
            assert_eq!(stats.time_moving, 0.0);
            assert_eq!(stats.stops, 0);
        }
        assert_eq!(result.metrics.total_passengers, 0);
        assert_eq!(result.metrics.throughput, 0.0);
    }

    #[test]
    fn warmup_spanning_the_whole_run_reports_zeros() {
        let mut config = base_config(4, 1, 100);
        config.warmup_s = 100;
        let result = run_strategy(&config, "collective_control");

        // The default arrival profile still spawns people; all are warm-up.
        assert!(result.passengers.iter().all(|p| p.discarded));
        assert_eq!(result.metrics.total_passengers, 0);
        assert_eq!(result.metrics.unfinished_passengers, 0);
        assert_eq!(result.metrics.throughput, 0.0);
        assert_eq!(result.metrics.average_wait, 0.0);
    }

    #[test]
    fn missing_arrival_section_installs_default_profile() {
        let config = base_config(4, 2, 300);
        let result = run_strategy(&config, "collective_control");
        assert!(
            !result.passengers.is_empty(),
            "0.5/min per floor per direction over 300 s should spawn someone"
        );
    }
}

// ── Single-trip trajectory ────────────────────────────────────────────────────

#[cfg(test)]
mod single_trip {
    use super::*;

    /// One event passenger, one car, default hardware.  The whole trajectory
    /// is hand-computable: board at t=0, a 5.2 s dwell, a 3-floor / 7.5 s
    /// climb, exit on arrival at t=14.
    fn one_passenger_config() -> SimulationConfig {
        let mut config = base_config(4, 1, 30);
        config.arrivals = Some(ArrivalConfig {
            windows: quiet_windows(4, 30),
            events:  vec![ArrivalEvent {
                time_s:       0,
                floor:        0,
                direction:    Direction::Up,
                count:        1,
                destinations: Some(vec![3]),
            }],
        });
        config
    }

    #[test]
    fn timestamps_follow_the_countdowns() {
        let result = run_strategy(&one_passenger_config(), "collective_control");

        assert_eq!(result.passengers.len(), 1);
        let p = &result.passengers[0];
        assert_eq!(p.board_time, Some(0.0));
        assert_eq!(p.exit_time, Some(14.0));
        assert_eq!(p.wait_time(), Some(0.0));
        assert_eq!(p.travel_time(), Some(14.0));
    }

    #[test]
    fn telemetry_is_charged_at_dispatch() {
        let result = run_strategy(&one_passenger_config(), "collective_control");
        let stats = &result.car_stats[0];

        assert_eq!(stats.distance_travelled, 3.0);
        assert_eq!(stats.stops, 2); // pickup and delivery
        // Two stop charges plus three floors of travel.
        assert_eq!(stats.energy, 2.0 * 0.5 + 3.0 * 1.0);
        // The loaded climb is the only movement: nothing ran empty.
        assert_eq!(stats.empty_distance, 0.0);
        // Onboard from the tick after boarding through the arrival tick.
        assert_eq!(stats.occupancy_time, 14.0);
        assert_eq!(stats.time_moving, 8.0);
        assert_eq!(
            stats.time_idle + stats.time_moving + stats.time_boarding,
            30.0
        );
        assert_eq!(result.metrics.throughput, 1.0 / 30.0);
    }

    #[test]
    fn repositioning_returns_the_car_to_its_idle_floor() {
        let mut config = base_config(4, 1, 40);
        config.elevator.idle_floors = Some(vec![2]);
        config.arrivals = Some(ArrivalConfig {
            windows: quiet_windows(4, 40),
            events:  vec![ArrivalEvent {
                time_s:       0,
                floor:        0,
                direction:    Direction::Up,
                count:        1,
                destinations: Some(vec![1]),
            }],
        });
        let strategy = Strategy::build("collective_control", &config).unwrap();
        let mut simulation = Simulation::new(config, strategy);

        struct FinalState {
            floor: usize,
            mode:  CarMode,
        }
        impl SimObserver for FinalState {
            fn on_tick_end(&mut self, _tick: u64, cars: &[Car], _log: &PassengerLog) {
                self.floor = cars[0].floor();
                self.mode = cars[0].mode;
            }
        }
        let mut watch = FinalState { floor: 0, mode: CarMode::Idle };
        let result = simulation.run_with_observer(&mut watch);

        assert_eq!(watch.floor, 2, "car should park back on its idle floor");
        assert_eq!(watch.mode, CarMode::Idle);
        // Boot at 2, fetch at 0, deliver to 1, return to 2.
        assert_eq!(result.car_stats[0].distance_travelled, 4.0);
        assert_eq!(result.car_stats[0].empty_distance, 3.0);
    }
}

// ── Event bursts ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod event_bursts {
    use super::*;

    #[test]
    fn bursts_inject_exact_counts_at_their_tick() {
        let mut config = base_config(4, 2, 120);
        config.arrivals = Some(ArrivalConfig {
            windows: quiet_windows(4, 120),
            events:  vec![
                ArrivalEvent {
                    time_s:       30,
                    floor:        0,
                    direction:    Direction::Up,
                    count:        3,
                    destinations: Some(vec![2, 3]),
                },
                ArrivalEvent {
                    time_s:       30,
                    floor:        3,
                    direction:    Direction::Down,
                    count:        2,
                    destinations: Some(vec![0, 1]),
                },
            ],
        });
        let result = run_strategy(&config, "collective_control");

        assert_eq!(result.passengers.len(), 5);
        for p in &result.passengers {
            assert!(p.from_event);
            assert_eq!(p.request_time, 30.0);
            assert_ne!(p.origin, p.destination);
        }
    }
}

// ── Per-tick invariants across all strategies ─────────────────────────────────

#[cfg(test)]
mod invariants {
    use super::*;

    /// Checks the capacity, onboard-state, and mode/direction invariants at
    /// every tick boundary.
    struct InvariantWatch {
        capacity: usize,
    }

    impl SimObserver for InvariantWatch {
        fn on_tick_end(&mut self, tick: u64, cars: &[Car], log: &PassengerLog) {
            let mut onboard_seen = std::collections::HashSet::new();
            for car in cars {
                assert!(
                    car.occupants() <= self.capacity,
                    "tick {tick}: {} overloaded: {} occupants",
                    car.id,
                    car.occupants()
                );
                if car.mode == CarMode::Idle {
                    assert_eq!(car.direction, None, "tick {tick}: idle car with a direction");
                }
                if car.mode == CarMode::Moving {
                    assert!(car.direction.is_some(), "tick {tick}: moving car without direction");
                    assert!(car.target_floor.is_some(), "tick {tick}: moving car without target");
                }
                for &id in &car.passengers {
                    assert!(onboard_seen.insert(id), "tick {tick}: {id} on two cars");
                    let p = log.get(id);
                    assert!(p.board_time.is_some(), "tick {tick}: onboard without board time");
                    assert!(p.exit_time.is_none(), "tick {tick}: onboard after exit");
                }
            }
        }
    }

    fn loaded_config() -> SimulationConfig {
        let mut config = base_config(6, 2, 400);
        config.warmup_s = 50;
        config.elevator.capacity = 4;
        config.arrivals = Some(ArrivalConfig {
            windows: busy_windows(6, 400, 2.0),
            events:  vec![ArrivalEvent {
                time_s:       200,
                floor:        0,
                direction:    Direction::Up,
                count:        6,
                destinations: None,
            }],
        });
        config
    }

    #[test]
    fn hold_for_every_strategy() {
        for name in Strategy::NAMES {
            let config = loaded_config();
            let strategy = Strategy::build(name, &config).unwrap();
            let mut simulation = Simulation::new(config.clone(), strategy);
            let mut watch = InvariantWatch { capacity: config.elevator.capacity };
            let result = simulation.run_with_observer(&mut watch);

            // Finished + unfinished partitions the metric population.
            let measured = result
                .passengers
                .iter()
                .filter(|p| !p.discarded && p.request_time >= config.warmup_s as f64)
                .count();
            assert_eq!(
                result.metrics.total_passengers + result.metrics.unfinished_passengers,
                measured,
                "{name}: partition broken"
            );

            // Timestamp ordering and direction consistency for finished trips.
            for p in result.passengers.iter().filter(|p| p.completed()) {
                let board = p.board_time.expect("finished implies boarded");
                let exit = p.exit_time.unwrap();
                assert!(p.request_time <= board && board <= exit, "{name}: time order");
                assert_eq!(p.direction, Direction::of_trip(p.origin, p.destination));
            }

            // Gross telemetry dominates the active subset.
            for stats in &result.car_stats {
                assert!(stats.distance_travelled >= stats.active_distance, "{name}");
                assert!(stats.energy >= stats.active_energy, "{name}");
                assert!(stats.empty_distance >= stats.active_empty_distance, "{name}");
            }

            assert!(result.metrics.total_passengers > 0, "{name}: nobody finished");
        }
    }
}

// ── Determinism ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod determinism {
    use super::*;

    fn seeded_config() -> SimulationConfig {
        let mut config = base_config(5, 2, 200);
        config.arrivals = Some(ArrivalConfig {
            windows: busy_windows(5, 200, 3.0),
            events:  vec![],
        });
        config
    }

    #[test]
    fn same_seed_reproduces_the_run() {
        let config = seeded_config();
        let a = run_strategy(&config, "collective_control");
        let b = run_strategy(&config, "collective_control");

        assert_eq!(a.passengers.len(), b.passengers.len());
        for (x, y) in a.passengers.iter().zip(&b.passengers) {
            assert_eq!(x.id, y.id);
            assert_eq!((x.origin, x.destination), (y.origin, y.destination));
            assert_eq!(x.request_time, y.request_time);
            assert_eq!(x.board_time, y.board_time);
            assert_eq!(x.exit_time, y.exit_time);
        }
        for (s, t) in a.car_stats.iter().zip(&b.car_stats) {
            assert_eq!(s.distance_travelled, t.distance_travelled);
            assert_eq!(s.stops, t.stops);
            assert_eq!(s.energy, t.energy);
            assert_eq!(s.occupancy_time, t.occupancy_time);
        }
        assert_eq!(a.metrics, b.metrics);
    }

    #[test]
    fn batch_results_are_reproducible() {
        let config = seeded_config();
        let strategies = vec!["collective_control".to_string(), "zoned_dispatch".to_string()];
        let first = run_batch(&config, &strategies, 2).unwrap();
        let second = run_batch(&config, &strategies, 2).unwrap();

        assert_eq!(first.len(), 4);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.strategy_name, b.strategy_name);
            assert_eq!(a.run_index, b.run_index);
            assert_eq!(a.metrics, b.metrics);
            assert_eq!(a.total_energy, b.total_energy);
        }
    }
}

// ── Batch runner ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use super::*;

    #[test]
    fn results_are_keyed_by_strategy_and_run() {
        let mut config = base_config(4, 1, 60);
        config.arrivals = Some(ArrivalConfig { windows: quiet_windows(4, 60), events: vec![] });
        let strategies = vec!["collective_control".to_string(), "energy_saver".to_string()];
        let results = run_batch(&config, &strategies, 3).unwrap();

        assert_eq!(results.len(), 6);
        let keys: Vec<(&str, u32)> = results
            .iter()
            .map(|r| (r.strategy_name.as_str(), r.run_index))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("collective_control", 0),
                ("collective_control", 1),
                ("collective_control", 2),
                ("energy_saver", 0),
                ("energy_saver", 1),
                ("energy_saver", 2),
            ]
        );
    }

    #[test]
    fn unknown_strategy_fails_the_batch() {
        let config = base_config(4, 1, 10);
        let strategies = vec!["teleporter".to_string()];
        assert!(run_batch(&config, &strategies, 1).is_err());
    }

    #[test]
    fn replication_seeds_are_stable_and_spaced() {
        let s0 = replication_seed(42, 0, "collective_control");
        assert_eq!(s0, replication_seed(42, 0, "collective_control"));
        assert_eq!(replication_seed(42, 1, "collective_control"), s0 + 997);
        assert_eq!(replication_seed(42, 3, "collective_control"), s0 + 3 * 997);
    }
}
