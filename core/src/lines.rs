//! Payline evaluation.
//!
//! Each payline is scored independently and every payline contributes;
//! there is no cap and no early exit across lines.

use crate::{
    error::{SimError, SimResult},
    evaluator::WinEvaluator,
    grid::Grid,
    paytable::{PayoutTable, PayoutWarning},
    types::{Credits, GRID_ROWS},
};
use serde::{Deserialize, Serialize};

/// Shortest run that pays, and the shortest payline accepted.
pub const MIN_RUN: usize = 3;

/// An ordered path of 0-indexed (row, col) cells, read left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payline {
    pub cells: Vec<(usize, usize)>,
}

impl Payline {
    pub fn new(cells: Vec<(usize, usize)>) -> Self {
        Self { cells }
    }

    /// One row per column, e.g. [0, 1, 2, 1, 0] for a V.
    pub fn from_rows(rows: &[usize]) -> Self {
        Self { cells: rows.iter().copied().enumerate().map(|(col, row)| (row, col)).collect() }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

pub struct LineEvaluator {
    paylines: Vec<Payline>,
    wild:     String,
}

impl LineEvaluator {
    /// Validates every payline against a GRID_ROWS x `columns` grid.
    pub fn new(paylines: Vec<Payline>, wild: impl Into<String>, columns: usize) -> SimResult<Self> {
        if paylines.is_empty() {
            return Err(SimError::NoPaylines);
        }
        for (line, payline) in paylines.iter().enumerate() {
            if payline.len() < MIN_RUN {
                return Err(SimError::PaylineTooShort { line, len: payline.len() });
            }
            if let Some(&(row, col)) =
                payline.cells.iter().find(|&&(row, col)| row >= GRID_ROWS || col >= columns)
            {
                return Err(SimError::PaylineOutOfBounds {
                    line,
                    row,
                    col,
                    rows: GRID_ROWS,
                    cols: columns,
                });
            }
        }
        Ok(Self { paylines, wild: wild.into() })
    }

    pub fn paylines(&self) -> &[Payline] {
        &self.paylines
    }

    /// Score one symbol sequence.
    ///
    /// Two candidates, the larger one pays:
    ///   A. a run of leading wilds, paid as the wild symbol;
    ///   B. a run anchored on the first non-wild symbol, where wilds both
    ///      before and after the anchor extend the run.
    pub fn score_line(
        &self,
        symbols: &[&str],
        paytable: &PayoutTable,
        warnings: &mut Vec<PayoutWarning>,
    ) -> Credits {
        if symbols.len() < MIN_RUN {
            return 0;
        }
        let wild = self.wild.as_str();
        let mut best = 0;

        if symbols[0] == wild {
            let wild_run = symbols.iter().take_while(|&&s| s == wild).count();
            if wild_run >= MIN_RUN {
                best = paytable.payout_for(wild, wild_run as u64, warnings);
            }
        }

        let mut anchor: Option<&str> = None;
        let mut run = 0usize;
        for &symbol in symbols {
            if symbol == wild {
                run += 1;
                continue;
            }
            match anchor {
                None => {
                    anchor = Some(symbol);
                    run += 1;
                }
                Some(a) if a == symbol => run += 1,
                Some(_) => break,
            }
        }

        if let Some(anchor) = anchor {
            if run >= MIN_RUN {
                best = best.max(paytable.payout_for(anchor, run as u64, warnings));
            }
        }

        best
    }
}

impl WinEvaluator for LineEvaluator {
    fn name(&self) -> &'static str { "lines" }

    fn evaluate(
        &self,
        grid: &Grid<'_>,
        paytable: &PayoutTable,
        warnings: &mut Vec<PayoutWarning>,
    ) -> Credits {
        let mut symbols: Vec<&str> = Vec::with_capacity(grid.columns());
        let mut total = 0;
        for payline in &self.paylines {
            symbols.clear();
            symbols.extend(payline.cells.iter().map(|&(row, col)| grid.get(row, col)));
            total += self.score_line(&symbols, paytable, warnings);
        }
        total
    }
}
