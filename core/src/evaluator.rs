//! Win evaluator trait and mode selection.
//!
//! RULE: Every win-evaluation scheme implements WinEvaluator.
//! The engine owns exactly one evaluator, chosen at construction.
//! Reels, grid, payout table and statistics are shared by all schemes;
//! only evaluate() varies.

use crate::{
    grid::Grid,
    lines::Payline,
    paytable::{PayoutTable, PayoutWarning},
    types::Credits,
};

/// The contract every evaluation scheme must fulfill.
pub trait WinEvaluator: Send + Sync {
    /// Unique stable name for this scheme.
    fn name(&self) -> &'static str;

    /// Score one grid at multiplier 1.
    ///
    /// - `grid`:     the visible window for this round
    /// - `paytable`: the shared payout table
    /// - `warnings`: lookups that resolved to zero are appended here
    fn evaluate(
        &self,
        grid: &Grid<'_>,
        paytable: &PayoutTable,
        warnings: &mut Vec<PayoutWarning>,
    ) -> Credits;
}

/// Which scheme an engine is built with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationMode {
    Lines(Vec<Payline>),
    Ways,
}

impl EvaluationMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lines(_) => "lines",
            Self::Ways     => "ways",
        }
    }
}
