use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No reels configured")]
    NoReels,

    #[error("Reel {reel} has no symbols")]
    EmptyReel { reel: usize },

    #[error("Reel {reel} has zero total weight")]
    ZeroReelWeight { reel: usize },

    #[error("Payout table is empty")]
    EmptyPayoutTable,

    #[error("Lines mode requires at least one payline")]
    NoPaylines,

    #[error("Payline {line} has {len} positions, at least 3 required")]
    PaylineTooShort { line: usize, len: usize },

    #[error("Payline {line} references ({row}, {col}) outside the {rows}x{cols} grid")]
    PaylineOutOfBounds {
        line: usize,
        row:  usize,
        col:  usize,
        rows: usize,
        cols: usize,
    },

    #[error("Grid must have {expected} rows, got {actual}")]
    GridRowCount { expected: usize, actual: usize },

    #[error("Grid rows must all have {expected} columns, row {row} has {actual}")]
    RaggedGrid { row: usize, expected: usize, actual: usize },

    #[error("Line cost must be positive")]
    ZeroLineCost,

    #[error("Bet multiplier must be positive")]
    InvalidBetMultiplier,

    #[error("Bet of {line_cost} x {bet_multiplier} does not fit in a balance")]
    BetOverflow { line_cost: u64, bet_multiplier: u64 },

    #[error("Win of {score} x {bet_multiplier} does not fit in a balance")]
    WinOverflow { score: u64, bet_multiplier: u64 },

    #[error("Statistics overflowed after {rounds} rounds")]
    StatsOverflow { rounds: u64 },

    #[error("Worker count must be positive")]
    NoWorkers,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
