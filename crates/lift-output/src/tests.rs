//! Integration tests for lift-output.

use lift_core::{ArrivalConfig, ArrivalEvent, ArrivalWindow, Direction, ElevatorConfig, SimulationConfig};
use lift_sim::{Simulation, SimulationResult};
use lift_strategy::Strategy;

fn small_result() -> SimulationResult {
    let config = SimulationConfig {
        num_floors:    4,
        num_elevators: 1,
        duration_s:    40,
        warmup_s:      0,
        elevator:      ElevatorConfig::default(),
        arrivals: Some(ArrivalConfig {
            windows: vec![ArrivalWindow {
                start_s: 0,
                end_s:   40,
                up_rate_per_minute:   vec![0.0; 4],
                down_rate_per_minute: vec![0.0; 4],
            }],
            events: vec![ArrivalEvent {
                time_s:       0,
                floor:        0,
                direction:    Direction::Up,
                count:        2,
                destinations: Some(vec![3]),
            }],
        }),
        random_seed: Some(5),
    };
    let strategy = Strategy::build("collective_control", &config).unwrap();
    let mut simulation = Simulation::new(config, strategy);
    simulation.set_run_index(1);
    simulation.run()
}

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CsvReportWriter, ELEVATORS_FILE, PASSENGERS_FILE, SUMMARY_FILE};

    use super::small_result;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvReportWriter::new(dir.path()).unwrap();
        assert!(dir.path().join(SUMMARY_FILE).exists());
        assert!(dir.path().join(PASSENGERS_FILE).exists());
        assert!(dir.path().join(ELEVATORS_FILE).exists());
    }

    #[test]
    fn summary_headers_and_rows() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.write_result(&small_result()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(SUMMARY_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        // The run key, every MetricResult field, and the gross energy total.
        assert_eq!(
            headers,
            [
                "strategy",
                "run_index",
                "average_wait",
                "median_wait",
                "pct90_wait",
                "max_wait",
                "std_wait",
                "average_travel",
                "median_travel",
                "std_travel",
                "average_system",
                "gini_wait",
                "throughput",
                "total_passengers",
                "unfinished_passengers",
                "completion_ratio",
                "energy_per_passenger",
                "distance_per_passenger",
                "average_occupancy",
                "idle_fraction",
                "moving_fraction",
                "boarding_fraction",
                "empty_trip_fraction",
                "total_energy",
            ]
        );

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.len(), headers.len());
        assert_eq!(&row[0], "collective_control");
        assert_eq!(&row[1], "1");
        // Every trip completed in this tiny run.
        assert_eq!(&row[15], "1");
    }

    #[test]
    fn passenger_rows_cover_the_log() {
        let dir = tmp();
        let result = small_result();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.write_result(&result).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(PASSENGERS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), result.passengers.len());
        // passenger_id, origin, destination for the first spawn.
        assert_eq!(&rows[0][2], "0");
        assert_eq!(&rows[0][3], "0");
        assert_eq!(&rows[0][4], "3");
        // Everyone finished in this tiny run: completed column is true.
        assert!(rows.iter().all(|r| &r[12] == "true"));
    }

    #[test]
    fn warmup_passengers_are_excluded() {
        let dir = tmp();
        let mut result = small_result();
        result.passengers[0].discarded = true;
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.write_result(&result).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(PASSENGERS_FILE)).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), result.passengers.len() - 1);
    }

    #[test]
    fn elevator_rows_carry_full_telemetry() {
        let dir = tmp();
        let result = small_result();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.write_result(&result).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(ELEVATORS_FILE)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert!(headers.contains(&"active_distance".to_string()));
        assert!(headers.contains(&"occupancy_time".to_string()));
        assert!(headers.contains(&"passengers_moved".to_string()));

        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][2], "0"); // elevator_id
        assert_eq!(&rows[0][14], "2"); // passengers_moved
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvReportWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod json_tests {
    use tempfile::TempDir;

    use crate::export_json;

    use super::small_result;

    #[test]
    fn export_round_trips_scalars() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        let result = small_result();
        export_json(std::slice::from_ref(&result), &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        let doc = &parsed[0];
        assert_eq!(doc["strategy"], "collective_control");
        assert_eq!(doc["run_index"], 1);
        assert_eq!(doc["config"]["num_floors"], 4);
        assert_eq!(doc["config"]["duration_s"], 40);
        let wait = doc["metrics"]["average_wait"].as_f64().unwrap();
        assert!((wait - result.metrics.average_wait).abs() < 1e-9);
        let energy = doc["total_energy"].as_f64().unwrap();
        assert!((energy - result.total_energy).abs() < 1e-9);
        assert_eq!(doc["elevators"].as_array().unwrap().len(), 1);
    }
}
