//! Payout table and the single lookup path shared by both evaluators.

use crate::{
    error::{SimError, SimResult},
    types::Credits,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A lookup that resolved to zero for a reason other than "no win".
/// Never fatal; the engine tallies these and reports them to observers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PayoutWarning {
    UnknownSymbol {
        symbol: String,
    },
    MatchCountOutOfRange {
        symbol: String,
        count:  u64,
        max:    u64,
    },
}

impl std::fmt::Display for PayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownSymbol { symbol } => {
                write!(f, "symbol '{symbol}' not found in payout table")
            }
            Self::MatchCountOutOfRange { symbol, count, max } => {
                write!(f, "invalid count {count} for symbol '{symbol}' (table pays 1..={max})")
            }
        }
    }
}

/// Symbol name -> payouts, where payouts[n - 1] is the award for n matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutTable {
    entries: HashMap<String, Vec<Credits>>,
}

impl PayoutTable {
    pub fn new(entries: HashMap<String, Vec<Credits>>) -> SimResult<Self> {
        if entries.is_empty() {
            return Err(SimError::EmptyPayoutTable);
        }
        Ok(Self { entries })
    }

    /// Convenience for tests and in-code game definitions.
    pub fn from_pairs<'s>(
        pairs: impl IntoIterator<Item = (&'s str, Vec<Credits>)>,
    ) -> SimResult<Self> {
        Self::new(pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }

    /// Strict lookup. Err carries why the lookup did not resolve.
    pub fn lookup(&self, symbol: &str, count: u64) -> Result<Credits, PayoutWarning> {
        let payouts = self.entries.get(symbol).ok_or_else(|| PayoutWarning::UnknownSymbol {
            symbol: symbol.to_string(),
        })?;
        if count < 1 || count > payouts.len() as u64 {
            return Err(PayoutWarning::MatchCountOutOfRange {
                symbol: symbol.to_string(),
                count,
                max: payouts.len() as u64,
            });
        }
        Ok(payouts[(count - 1) as usize])
    }

    /// Lookup that resolves every miss to 0 and records the warning.
    pub fn payout_for(
        &self,
        symbol: &str,
        count: u64,
        warnings: &mut Vec<PayoutWarning>,
    ) -> Credits {
        match self.lookup(symbol, count) {
            Ok(amount) => amount,
            Err(warning) => {
                warnings.push(warning);
                0
            }
        }
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.entries.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
