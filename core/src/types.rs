//! Shared primitive types used across the entire simulation.

/// A simulated round number, 1-based once the round has been played.
pub type Round = u64;

/// Credits. Every payout, bet and total is a whole number of credits.
pub type Credits = u64;

/// Number of visible rows in every reel window.
pub const GRID_ROWS: usize = 3;

/// Symbol name reserved for the wild unless a game overrides it.
pub const DEFAULT_WILD: &str = "WW";

/// Cost in credits to cover every payline (or every way) at multiplier 1.
pub const DEFAULT_LINE_COST: Credits = 50;
