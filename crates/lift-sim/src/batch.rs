//! Batch runner: replications of strategies under derived seeds.

use lift_core::{LiftResult, SimulationConfig};
use lift_strategy::Strategy;

use crate::{Simulation, SimulationResult};

/// Run `runs_per_strategy` replications of each named strategy.
///
/// Every replication gets its own config copy with a seed derived from the
/// base seed, the run index, and a stable hash of the strategy name, so
/// results are reproducible per cell and comparable across strategies.  With
/// the `parallel` feature, replications run on Rayon's thread pool; the
/// result order is `(strategy, run_index)` either way.
pub fn run_batch(
    config:            &SimulationConfig,
    strategies:        &[String],
    runs_per_strategy: u32,
) -> LiftResult<Vec<SimulationResult>> {
    let mut jobs: Vec<(&str, u32)> = Vec::new();
    for name in strategies {
        for run in 0..runs_per_strategy {
            jobs.push((name.as_str(), run));
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        jobs.into_iter()
            .map(|(name, run)| run_replication(config, name, run))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        jobs.into_par_iter()
            .map(|(name, run)| run_replication(config, name, run))
            .collect()
    }
}

fn run_replication(
    config: &SimulationConfig,
    name:   &str,
    run:    u32,
) -> LiftResult<SimulationResult> {
    let mut cfg = config.clone();
    cfg.random_seed = Some(replication_seed(
        config.random_seed.unwrap_or(0),
        run,
        name,
    ));
    let strategy = Strategy::build(name, &cfg)?;
    let mut simulation = Simulation::new(cfg, strategy);
    simulation.set_run_index(run);
    Ok(simulation.run())
}

/// The seed for one `(run, strategy)` cell:
/// `base + run·997 + stable_hash(strategy) mod 997`.
pub fn replication_seed(base_seed: u64, run_index: u32, strategy_name: &str) -> u64 {
    base_seed + run_index as u64 * 997 + stable_hash(strategy_name) % 997
}

/// FNV-1a over the name bytes.  Process-independent, unlike the default
/// hasher, so seeds are stable across builds and machines.
fn stable_hash(name: &str) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME:  u64 = 0x0000_0100_0000_01b3;
    let mut hash = FNV_OFFSET;
    for byte in name.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
