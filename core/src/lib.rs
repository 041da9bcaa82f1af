//! Monte Carlo RTP simulation for reel-based slot games.
//!
//! Build a `SimEngine` from reels, a payout table and an evaluation mode
//! (paylines or ways), then run rounds and read back `SimStats`.

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod event;
pub mod grid;
pub mod lines;
pub mod parallel;
pub mod paytable;
pub mod reel;
pub mod rng;
pub mod stats;
pub mod symbol;
pub mod types;
pub mod ways;

pub use engine::{EngineSettings, RoundOutcome, SimEngine};
pub use error::{SimError, SimResult};
pub use evaluator::{EvaluationMode, WinEvaluator};
pub use stats::SimStats;
