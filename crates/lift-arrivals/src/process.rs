//! The arrival process: windowed Poisson rates plus scheduled bursts.

use std::collections::HashMap;

use lift_core::{ArrivalConfig, ArrivalEvent, ArrivalWindow, Direction, Passenger, SimRng};

/// Generates passengers for each simulation tick.
///
/// All randomness flows through the caller-supplied [`SimRng`] in a fixed
/// order (floor ascending, up before down, then events in configuration
/// order), so a run is reproducible from its seed alone.
pub struct ArrivalProcess {
    config:     ArrivalConfig,
    num_floors: usize,
    /// Bursts grouped by their firing tick, preserving configuration order.
    events_by_time: HashMap<u64, Vec<ArrivalEvent>>,
}

impl ArrivalProcess {
    /// Build the process for a validated configuration.
    ///
    /// `num_floors` comes from the simulation config rather than being
    /// inferred from the rate vectors, so an events-only or empty window
    /// list still works.
    pub fn new(config: ArrivalConfig, num_floors: usize) -> Self {
        let mut events_by_time: HashMap<u64, Vec<ArrivalEvent>> = HashMap::new();
        for event in &config.events {
            events_by_time.entry(event.time_s).or_default().push(event.clone());
        }
        ArrivalProcess { config, num_floors, events_by_time }
    }

    /// Spawn the passengers arriving at tick `now`.
    ///
    /// Returns an empty vector outside every configured window.  Spawned
    /// passengers carry `PassengerId::INVALID` until the kernel registers
    /// them.
    pub fn generate(&self, now: u64, rng: &mut SimRng) -> Vec<Passenger> {
        let Some(window) = self.window_for_time(now) else {
            return Vec::new();
        };

        let mut passengers = Vec::new();
        for floor in 0..self.num_floors {
            self.spawn_at_floor(
                &mut passengers,
                now,
                floor,
                Direction::Up,
                window.up_rate_per_minute[floor],
                rng,
            );
            self.spawn_at_floor(
                &mut passengers,
                now,
                floor,
                Direction::Down,
                window.down_rate_per_minute[floor],
                rng,
            );
        }

        if let Some(events) = self.events_by_time.get(&now) {
            for event in events {
                self.spawn_event(&mut passengers, now, event, rng);
            }
        }
        passengers
    }

    // ── Window arrivals ───────────────────────────────────────────────────

    fn spawn_at_floor(
        &self,
        out:             &mut Vec<Passenger>,
        now:             u64,
        floor:           usize,
        direction:       Direction,
        rate_per_minute: f64,
        rng:             &mut SimRng,
    ) {
        let (lo, hi) = self.legal_destination_span(floor, direction);
        if rate_per_minute <= 0.0 || lo >= hi {
            return;
        }
        let lambda = rate_per_minute / 60.0;
        let draw = rng.uniform();
        let count = poisson_count(lambda, draw, rng);
        for _ in 0..count {
            let destination = rng.gen_range(lo..hi);
            out.push(Passenger::new(floor, destination, now as f64, direction));
        }
    }

    /// The half-open floor span a passenger at `floor` may travel to.
    fn legal_destination_span(&self, floor: usize, direction: Direction) -> (usize, usize) {
        match direction {
            Direction::Up   => (floor + 1, self.num_floors),
            Direction::Down => (0, floor),
        }
    }

    // ── Event bursts ──────────────────────────────────────────────────────

    fn spawn_event(
        &self,
        out:   &mut Vec<Passenger>,
        now:   u64,
        event: &ArrivalEvent,
        rng:   &mut SimRng,
    ) {
        let destinations: Vec<usize> = match &event.destinations {
            Some(list) if !list.is_empty() => list.clone(),
            _ => {
                let (lo, hi) = self.legal_destination_span(event.floor, event.direction);
                (lo..hi).collect()
            }
        };
        if destinations.is_empty() {
            return;
        }
        for _ in 0..event.count {
            let destination = *rng.choose(&destinations).expect("non-empty destination list");
            let mut p = Passenger::new(event.floor, destination, now as f64, event.direction);
            p.from_event = true;
            out.push(p);
        }
    }

    fn window_for_time(&self, now: u64) -> Option<&ArrivalWindow> {
        self.config.windows.iter().find(|w| w.contains(now))
    }
}

// ── Poisson sampling ──────────────────────────────────────────────────────────

/// Draw a Poisson-distributed count at rate `lambda` per tick.
///
/// `draw` is a pre-drawn uniform in `[0, 1)`.  Below λ = 0.1 the count is
/// approximated by a single Bernoulli trial on `draw` (capping the count at
/// one), which preserves the heavy low-rate regime without extra draws.
/// Above that, Knuth's inverse transform multiplies uniforms until the
/// product drops below `exp(-λ)`.
fn poisson_count(lambda: f64, draw: f64, rng: &mut SimRng) -> usize {
    if lambda <= 0.0 {
        return 0;
    }
    if lambda < 0.1 {
        return usize::from(draw < lambda);
    }
    let limit = (-lambda).exp();
    let mut k: usize = 0;
    let mut p = 1.0;
    while p > limit {
        k += 1;
        p *= rng.uniform();
    }
    k - 1
}
