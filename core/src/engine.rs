//! The simulation engine.
//!
//! ROUND ORDER (fixed, never reordered):
//!   1. Charge the bet: line_cost * bet_multiplier.
//!   2. Spin every reel and build the grid.
//!   3. Score the grid with the configured evaluator.
//!   4. Pay the win: score * bet_multiplier.
//!
//! RULES:
//!   - All randomness flows through the engine's SpinRng.
//!   - Statistics change only through record_bet() / record_win().
//!   - A round whose bet or win overflows fails whole; no totals move.
//!   - The grid never outlives the round that produced it.
//!   - The engine never writes to a terminal; observers receive SimEvents.

use crate::{
    error::{SimError, SimResult},
    evaluator::{EvaluationMode, WinEvaluator},
    event::{SimEvent, PROGRESS_STEPS},
    grid::Grid,
    lines::LineEvaluator,
    paytable::{PayoutTable, PayoutWarning},
    reel::Reel,
    rng::{RngBank, SpinRng},
    stats::SimStats,
    types::{Credits, Round, DEFAULT_LINE_COST, DEFAULT_WILD},
    ways::WaysEvaluator,
};
use std::{collections::HashMap, ops::ControlFlow, sync::Arc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub seed:            u64,
    /// Credits charged per round at multiplier 1.
    pub line_cost:       Credits,
    pub initial_balance: i64,
    pub wild_symbol:     String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            seed:            0,
            line_cost:       DEFAULT_LINE_COST,
            initial_balance: 0,
            wild_symbol:     DEFAULT_WILD.to_string(),
        }
    }
}

/// Result of a single round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round:    Round,
    pub bet:      Credits,
    pub win:      Credits,
    /// Lookups in this round that resolved to zero for a non-win reason.
    pub warnings: Vec<PayoutWarning>,
}

/// Immutable game definition, shared between an engine and its forks.
pub(crate) struct Game {
    pub(crate) reels:     Vec<Reel>,
    pub(crate) paytable:  PayoutTable,
    pub(crate) evaluator: Box<dyn WinEvaluator>,
    pub(crate) line_cost: Credits,
}

pub struct SimEngine {
    pub(crate) game:  Arc<Game>,
    seed:             u64,
    pub(crate) rng:   SpinRng,
    pub(crate) stats: SimStats,
    /// Every distinct warning seen by this engine and how often.
    pub(crate) warnings: HashMap<PayoutWarning, u64>,
    round_warnings:   Vec<PayoutWarning>,
}

impl SimEngine {
    /// Build an engine from validated parts.
    /// Fails on an empty reel set, an empty payout table, a zero line
    /// cost, or (lines mode) a missing or malformed payline.
    pub fn new(
        reels: Vec<Reel>,
        paytable: PayoutTable,
        mode: EvaluationMode,
        settings: EngineSettings,
    ) -> SimResult<Self> {
        if reels.is_empty() {
            return Err(SimError::NoReels);
        }
        if paytable.is_empty() {
            return Err(SimError::EmptyPayoutTable);
        }
        if settings.line_cost == 0 {
            return Err(SimError::ZeroLineCost);
        }

        let evaluator: Box<dyn WinEvaluator> = match mode {
            EvaluationMode::Lines(paylines) => Box::new(LineEvaluator::new(
                paylines,
                settings.wild_symbol.as_str(),
                reels.len(),
            )?),
            EvaluationMode::Ways => Box::new(WaysEvaluator::new(settings.wild_symbol.as_str())),
        };

        for (index, reel) in reels.iter().enumerate() {
            for symbol in reel.symbols() {
                if !paytable.contains(&symbol.name) {
                    log::warn!("reel {index}: symbol '{}' has no payout entry", symbol.name);
                }
            }
        }

        log::debug!(
            "engine built: mode={} reels={} symbols_paid={} seed={}",
            evaluator.name(),
            reels.len(),
            paytable.len(),
            settings.seed
        );

        Ok(Self {
            game: Arc::new(Game {
                reels,
                paytable,
                evaluator,
                line_cost: settings.line_cost,
            }),
            seed:           settings.seed,
            rng:            RngBank::new(settings.seed).for_worker(0),
            stats:          SimStats::new(settings.initial_balance),
            warnings:       HashMap::new(),
            round_warnings: Vec::new(),
        })
    }

    /// A fresh engine sharing this game, with its own RNG stream and
    /// zeroed statistics. Used by the parallel runner.
    pub(crate) fn fork(&self, bank: RngBank, worker_index: u64) -> Self {
        Self {
            game:           Arc::clone(&self.game),
            seed:           bank.master_seed(),
            rng:            bank.for_worker(worker_index),
            stats:          SimStats::new(0),
            warnings:       HashMap::new(),
            round_warnings: Vec::new(),
        }
    }

    /// Play one round and return its outcome.
    pub fn play_round(&mut self, bet_multiplier: u64) -> SimResult<RoundOutcome> {
        let bet = self.stake(bet_multiplier)?;
        let scored = self.spin_and_score(bet, bet_multiplier);
        let warnings = self.round_warnings.clone();
        self.tally_round_warnings();
        let win = scored?;
        Ok(RoundOutcome {
            round: self.stats.rounds_played,
            bet,
            win,
            warnings,
        })
    }

    /// Run `count` rounds with no observer. Returns a statistics snapshot.
    pub fn run_rounds(&mut self, count: u64, bet_multiplier: u64) -> SimResult<SimStats> {
        self.run_rounds_observed(count, bet_multiplier, |_| ControlFlow::Continue(()))
    }

    /// Run up to `count` rounds, reporting to `observer`.
    ///
    /// The observer sees RunStarted, Progress every 5%, the first
    /// occurrence of each distinct payout warning, and RunCompleted.
    /// Returning ControlFlow::Break stops the run after the current round.
    /// An overflowing round aborts the run with an error and no RunCompleted.
    pub fn run_rounds_observed<F>(
        &mut self,
        count: u64,
        bet_multiplier: u64,
        mut observer: F,
    ) -> SimResult<SimStats>
    where
        F: FnMut(&SimEvent) -> ControlFlow<()>,
    {
        let bet = self.stake(bet_multiplier)?;

        let mut stopped = observer(&SimEvent::RunStarted {
            seed:           self.seed,
            mode:           self.game.evaluator.name().to_string(),
            total_rounds:   count,
            bet_multiplier,
        })
        .is_break();

        let step = (count / PROGRESS_STEPS).max(1);
        let mut done = 0u64;
        while !stopped && done < count {
            let scored = self.spin_and_score(bet, bet_multiplier);
            let fresh = self.tally_round_warnings();
            scored?;
            done += 1;

            let round = self.stats.rounds_played;
            for warning in fresh {
                let event = SimEvent::PayoutWarningRaised { round, warning };
                stopped |= observer(&event).is_break();
            }

            if done.is_multiple_of(step) {
                let event = SimEvent::Progress { rounds_done: done, total_rounds: count };
                stopped |= observer(&event).is_break();
            }
        }

        if stopped && done < count {
            log::debug!("run stopped by observer after {done} of {count} rounds");
        }
        log::debug!(
            "run complete: rounds={done} wagered={} won={} rtp={:.4}",
            self.stats.total_wagered,
            self.stats.total_won,
            self.stats.rtp()
        );

        let _ = observer(&SimEvent::RunCompleted {
            rounds_done: done,
            stopped:     done < count,
            stats:       self.stats.clone(),
        });

        Ok(self.stats.clone())
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn mode_name(&self) -> &'static str {
        self.game.evaluator.name()
    }

    pub fn line_cost(&self) -> Credits {
        self.game.line_cost
    }

    pub fn reels(&self) -> &[Reel] {
        &self.game.reels
    }

    pub fn paytable(&self) -> &PayoutTable {
        &self.game.paytable
    }

    /// Count of every distinct payout warning seen so far.
    pub fn warning_tally(&self) -> &HashMap<PayoutWarning, u64> {
        &self.warnings
    }

    pub fn total_warnings(&self) -> u64 {
        self.warnings.values().sum()
    }

    /// Bet for one round at `bet_multiplier`.
    /// Rejects a zero multiplier and any bet a balance cannot absorb.
    pub(crate) fn stake(&self, bet_multiplier: u64) -> SimResult<Credits> {
        if bet_multiplier == 0 {
            return Err(SimError::InvalidBetMultiplier);
        }
        let line_cost = self.game.line_cost;
        line_cost
            .checked_mul(bet_multiplier)
            .filter(|&bet| i64::try_from(bet).is_ok())
            .ok_or(SimError::BetOverflow { line_cost, bet_multiplier })
    }

    /// Steps 1–4 of the round order. Warnings land in round_warnings.
    fn spin_and_score(&mut self, bet: Credits, bet_multiplier: u64) -> SimResult<Credits> {
        let game = &self.game;
        let mut stats = self.stats.clone();
        stats.record_bet(bet)?;

        let grid = Grid::spin(&game.reels, &mut self.rng);
        let score = game
            .evaluator
            .evaluate(&grid, &game.paytable, &mut self.round_warnings);
        drop(grid);

        let win = score
            .checked_mul(bet_multiplier)
            .ok_or(SimError::WinOverflow { score, bet_multiplier })?;
        stats.record_win(win)?;
        self.stats = stats;
        Ok(win)
    }

    /// Drain this round's warnings into the tally.
    /// Returns the ones this engine had never seen before.
    fn tally_round_warnings(&mut self) -> Vec<PayoutWarning> {
        let mut fresh = Vec::new();
        for warning in self.round_warnings.drain(..) {
            let seen = self.warnings.entry(warning.clone()).or_insert(0);
            if *seen == 0 {
                log::warn!("round {}: {warning}", self.stats.rounds_played);
                fresh.push(warning);
            }
            *seen += 1;
        }
        fresh
    }
}
