//! Unit tests for the metric aggregator.

#[cfg(test)]
mod basic {
    use lift_core::{Direction, Passenger};

    use crate::{compute_metrics, OperationalTotals};

    fn completed_trip(origin: usize, dest: usize, request: f64, wait: f64, travel: f64) -> Passenger {
        let mut p = Passenger::new(origin, dest, request, Direction::of_trip(origin, dest));
        p.record_board(request + wait);
        p.record_exit(request + wait + travel);
        p
    }

    #[test]
    fn five_identical_trips() {
        let passengers: Vec<Passenger> = (0..5)
            .map(|i| completed_trip(0, 5, i as f64 * 10.0, 5.0, 15.0))
            .collect();
        let totals = OperationalTotals {
            total_energy:   100.0,
            total_distance: 50.0,
            occupancy_time: 200.0,
            idle_time:      40.0,
            moving_time:    30.0,
            boarding_time:  30.0,
            empty_distance: 10.0,
            num_elevators:  2,
        };

        let result = compute_metrics(&passengers, 100.0, &totals);
        assert_eq!(result.average_wait, 5.0);
        assert_eq!(result.median_wait, 5.0);
        assert_eq!(result.max_wait, 5.0);
        assert_eq!(result.std_wait, 0.0);
        assert_eq!(result.average_travel, 15.0);
        assert_eq!(result.median_travel, 15.0);
        assert_eq!(result.std_travel, 0.0);
        assert_eq!(result.average_system, 20.0);
        assert_eq!(result.throughput, 0.05);
        assert_eq!(result.total_passengers, 5);
        assert_eq!(result.unfinished_passengers, 0);
        assert_eq!(result.completion_ratio, 1.0);
        assert_eq!(result.energy_per_passenger, 20.0);
        assert_eq!(result.distance_per_passenger, 10.0);
        assert_eq!(result.average_occupancy, 1.0);
        assert_eq!(result.idle_fraction, 0.2);
        assert_eq!(result.empty_trip_fraction, 0.2);
        // Equal waits: perfectly equal distribution.
        assert!(result.gini_wait.abs() < 1e-12);
    }

    #[test]
    fn unfinished_passengers_counted_separately() {
        let done = completed_trip(0, 3, 0.0, 4.0, 6.0);
        let stuck = Passenger::new(1, 4, 20.0, Direction::Up);
        let passengers = vec![done, stuck];

        let result = compute_metrics(&passengers, 50.0, &OperationalTotals::default());
        assert_eq!(result.total_passengers, 1);
        assert_eq!(result.unfinished_passengers, 1);
        assert_eq!(result.completion_ratio, 0.5);
    }

    #[test]
    fn empty_sample_is_all_zeros() {
        let none: Vec<Passenger> = Vec::new();
        let result = compute_metrics(&none, 0.0, &OperationalTotals::default());
        assert_eq!(result.average_wait, 0.0);
        assert_eq!(result.median_wait, 0.0);
        assert_eq!(result.pct90_wait, 0.0);
        assert_eq!(result.gini_wait, 0.0);
        assert_eq!(result.throughput, 0.0);
        assert_eq!(result.completion_ratio, 0.0);
        assert_eq!(result.empty_trip_fraction, 0.0);
    }

    #[test]
    fn percentiles_interpolate() {
        // Waits 0, 10, 20, 30: median = 15, p90 = 27.
        let passengers: Vec<Passenger> = (0..4)
            .map(|i| completed_trip(0, 2, 0.0, i as f64 * 10.0, 5.0))
            .collect();
        let result = compute_metrics(&passengers, 100.0, &OperationalTotals::default());
        assert!((result.median_wait - 15.0).abs() < 1e-12);
        assert!((result.pct90_wait - 27.0).abs() < 1e-9);
        assert_eq!(result.max_wait, 30.0);
    }

    #[test]
    fn gini_of_skewed_waits() {
        // One passenger bears all the waiting: Gini = (n-1)/n for a single
        // non-zero value among n.
        let mut passengers = vec![completed_trip(0, 2, 0.0, 12.0, 5.0)];
        for _ in 0..3 {
            passengers.push(completed_trip(0, 2, 0.0, 0.0, 5.0));
        }
        let result = compute_metrics(&passengers, 100.0, &OperationalTotals::default());
        assert!((result.gini_wait - 0.75).abs() < 1e-12);
    }
}

#[cfg(test)]
mod round_trip {
    use lift_core::{Direction, Passenger};

    use crate::{compute_metrics, MetricResult, OperationalTotals};

    #[test]
    fn metric_result_survives_serde() {
        let mut p = Passenger::new(0, 4, 3.0, Direction::Up);
        p.record_board(7.5);
        p.record_exit(21.25);
        let totals = OperationalTotals {
            total_energy:   12.5,
            total_distance: 40.0,
            occupancy_time: 55.0,
            idle_time:      10.0,
            moving_time:    25.0,
            boarding_time:  15.0,
            empty_distance: 4.0,
            num_elevators:  1,
        };
        let original = compute_metrics(&[p], 50.0, &totals);

        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: MetricResult = serde_json::from_str(&encoded).unwrap();
        assert!((decoded.average_wait - original.average_wait).abs() < 1e-9);
        assert!((decoded.gini_wait - original.gini_wait).abs() < 1e-9);
        assert!((decoded.throughput - original.throughput).abs() < 1e-9);
        assert_eq!(decoded, original);
    }
}
