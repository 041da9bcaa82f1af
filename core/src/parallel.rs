//! Multi-worker execution.
//!
//! Rounds are independent, so a run can be split across workers as long
//! as no RNG or accumulator is shared. Each worker is a fork of the
//! engine with its own stream; totals are folded back in worker order
//! once every worker has finished.

use crate::{
    engine::SimEngine,
    error::{SimError, SimResult},
    paytable::PayoutWarning,
    rng::RngBank,
    stats::SimStats,
};
use rayon::prelude::*;
use std::collections::HashMap;

impl SimEngine {
    /// Run `count` rounds split across `workers` threads and fold the
    /// results into this engine's statistics. Nothing is folded in if any
    /// worker fails or the combined totals overflow.
    ///
    /// Deterministic for a given seed, call history and worker count.
    pub fn run_parallel(
        &mut self,
        count: u64,
        bet_multiplier: u64,
        workers: usize,
    ) -> SimResult<SimStats> {
        if workers == 0 {
            return Err(SimError::NoWorkers);
        }
        self.stake(bet_multiplier)?;

        // Worker seeds come from our own stream, so repeated calls never
        // replay the same rounds.
        let bank = RngBank::new(self.rng.next_u64());
        let shares = split_rounds(count, workers);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(anyhow::Error::from)?;

        let this = &*self;
        let results: Vec<(SimStats, HashMap<PayoutWarning, u64>)> = pool.install(|| {
            shares
                .par_iter()
                .enumerate()
                .map(|(index, &share)| -> SimResult<(SimStats, HashMap<PayoutWarning, u64>)> {
                    let mut worker = this.fork(bank, index as u64);
                    worker.run_rounds(share, bet_multiplier)?;
                    Ok((worker.stats, worker.warnings))
                })
                .collect::<SimResult<Vec<_>>>()
        })?;

        let mut merged = self.stats.clone();
        for (stats, _) in &results {
            merged.merge(stats)?;
        }
        self.stats = merged;
        for (_, warnings) in &results {
            for (warning, seen) in warnings {
                *self.warnings.entry(warning.clone()).or_insert(0) += seen;
            }
        }

        log::debug!(
            "parallel run complete: workers={workers} rounds={count} rtp={:.4}",
            self.stats.rtp()
        );
        Ok(self.stats.clone())
    }
}

/// Split `count` rounds as evenly as possible; earlier workers take the
/// remainder.
pub fn split_rounds(count: u64, workers: usize) -> Vec<u64> {
    let workers_u64 = workers as u64;
    let base = count / workers_u64;
    let extra = count % workers_u64;
    (0..workers_u64)
        .map(|i| base + u64::from(i < extra))
        .collect()
}
