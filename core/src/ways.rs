//! Ways evaluation.
//!
//! A symbol pays for every left-to-right path through consecutive reels
//! that shows it (or the wild), regardless of row. The first reel that
//! shows neither ends the chain and the symbol pays nothing.

use crate::{
    evaluator::WinEvaluator,
    grid::Grid,
    paytable::{PayoutTable, PayoutWarning},
    types::{Credits, GRID_ROWS},
};

pub struct WaysEvaluator {
    wild: String,
}

impl WaysEvaluator {
    pub fn new(wild: impl Into<String>) -> Self {
        Self { wild: wild.into() }
    }

    /// Product of per-reel match counts, 0 if any reel breaks the chain.
    pub fn ways_for(&self, grid: &Grid<'_>, symbol: &str) -> u64 {
        let mut ways = 1u64;
        for col in 0..grid.columns() {
            let hits = grid
                .column(col)
                .filter(|&cell| cell == symbol || cell == self.wild)
                .count() as u64;
            if hits == 0 {
                return 0;
            }
            ways *= hits;
        }
        ways
    }
}

impl WinEvaluator for WaysEvaluator {
    fn name(&self) -> &'static str { "ways" }

    fn evaluate(
        &self,
        grid: &Grid<'_>,
        paytable: &PayoutTable,
        warnings: &mut Vec<PayoutWarning>,
    ) -> Credits {
        if grid.columns() == 0 {
            return 0;
        }
        let mut scored: Vec<&str> = Vec::with_capacity(GRID_ROWS);
        let mut total = 0;
        for row in 0..GRID_ROWS {
            let candidate = grid.get(row, 0);
            if scored.contains(&candidate) {
                continue;
            }
            let ways = self.ways_for(grid, candidate);
            if ways > 0 {
                total += paytable.payout_for(candidate, ways, warnings);
                scored.push(candidate);
            }
        }
        total
    }
}
