//! Wagering statistics for a run.
//!
//! RULE: Only record_bet() and record_win() mutate a live accumulator.
//! merge() exists solely to fold finished worker totals into one.
//! A call that would overflow any total fails and leaves every field as it was.

use crate::{
    error::{SimError, SimResult},
    types::Credits,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    pub initial_balance: i64,
    pub balance:         i64,
    pub total_wagered:   Credits,
    pub total_won:       Credits,
    pub rounds_played:   u64,
    pub winning_rounds:  u64,
}

impl SimStats {
    pub fn new(initial_balance: i64) -> Self {
        Self {
            initial_balance,
            balance: initial_balance,
            ..Self::default()
        }
    }

    pub fn record_bet(&mut self, amount: Credits) -> SimResult<()> {
        let balance = i64::try_from(amount)
            .ok()
            .and_then(|amount| self.balance.checked_sub(amount));
        let wagered = self.total_wagered.checked_add(amount);
        let (Some(balance), Some(wagered)) = (balance, wagered) else {
            return Err(self.overflow());
        };
        self.balance = balance;
        self.total_wagered = wagered;
        self.rounds_played += 1;
        Ok(())
    }

    pub fn record_win(&mut self, amount: Credits) -> SimResult<()> {
        let balance = i64::try_from(amount)
            .ok()
            .and_then(|amount| self.balance.checked_add(amount));
        let won = self.total_won.checked_add(amount);
        let (Some(balance), Some(won)) = (balance, won) else {
            return Err(self.overflow());
        };
        self.balance = balance;
        self.total_won = won;
        if amount > 0 {
            self.winning_rounds += 1;
        }
        Ok(())
    }

    /// Return to player as a percentage. 0 when nothing was wagered.
    pub fn rtp(&self) -> f64 {
        if self.total_wagered == 0 {
            return 0.0;
        }
        self.total_won as f64 / self.total_wagered as f64 * 100.0
    }

    /// Share of rounds that paid anything, as a percentage.
    pub fn hit_frequency(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.winning_rounds as f64 / self.rounds_played as f64 * 100.0
    }

    /// Net result of play so far, excluding the starting balance.
    /// None if it does not fit in an i64.
    pub fn net(&self) -> Option<i64> {
        self.balance.checked_sub(self.initial_balance)
    }

    /// Fold another worker's totals in. The starting balance stays ours.
    pub fn merge(&mut self, other: &SimStats) -> SimResult<()> {
        let merged = other.net().and_then(|net| {
            Some(SimStats {
                initial_balance: self.initial_balance,
                balance:         self.balance.checked_add(net)?,
                total_wagered:   self.total_wagered.checked_add(other.total_wagered)?,
                total_won:       self.total_won.checked_add(other.total_won)?,
                rounds_played:   self.rounds_played.checked_add(other.rounds_played)?,
                winning_rounds:  self.winning_rounds.checked_add(other.winning_rounds)?,
            })
        });
        let merged = merged.ok_or_else(|| self.overflow())?;
        *self = merged;
        Ok(())
    }

    fn overflow(&self) -> SimError {
        SimError::StatsOverflow { rounds: self.rounds_played }
    }
}
