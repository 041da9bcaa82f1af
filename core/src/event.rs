//! Events reported to a run observer.
//!
//! RULE: The engine never prints. Everything a caller may want to log
//! or display during a run arrives as a SimEvent.

use crate::{
    paytable::PayoutWarning,
    stats::SimStats,
    types::Round,
};
use serde::{Deserialize, Serialize};

/// Number of progress reports per run (every 5%).
pub const PROGRESS_STEPS: u64 = 20;

/// Every event emitted while running rounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    RunStarted {
        seed:           u64,
        mode:           String,
        total_rounds:   u64,
        bet_multiplier: u64,
    },
    Progress {
        rounds_done:  u64,
        total_rounds: u64,
    },
    /// Emitted once per distinct warning per engine; repeats are only tallied.
    PayoutWarningRaised {
        round:   Round,
        warning: PayoutWarning,
    },
    RunCompleted {
        rounds_done: u64,
        stopped:     bool,
        stats:       SimStats,
    },
}

impl SimEvent {
    /// Stable string name, handy for log lines and filtering.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::RunStarted { .. }          => "run_started",
            Self::Progress { .. }            => "progress",
            Self::PayoutWarningRaised { .. } => "payout_warning_raised",
            Self::RunCompleted { .. }        => "run_completed",
        }
    }
}
