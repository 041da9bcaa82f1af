//! Weighted reel strips.

use crate::{
    error::{SimError, SimResult},
    rng::SpinRng,
    symbol::Symbol,
};

/// A circular strip of symbols. Insertion order is physical strip order.
#[derive(Debug, Clone)]
pub struct Reel {
    symbols:      Vec<Symbol>,
    total_weight: u64,
}

impl Reel {
    /// Build a reel. `reel` is only used to label construction errors.
    pub fn new(reel: usize, symbols: Vec<Symbol>) -> SimResult<Self> {
        if symbols.is_empty() {
            return Err(SimError::EmptyReel { reel });
        }
        let total_weight: u64 = symbols.iter().map(|s| u64::from(s.weight)).sum();
        if total_weight == 0 {
            return Err(SimError::ZeroReelWeight { reel });
        }
        Ok(Self { symbols, total_weight })
    }

    /// Pick a stopping index with probability weight[i] / total_weight.
    ///
    /// Draws in [1, total_weight] and returns the first index whose
    /// running weight sum reaches the draw.
    pub fn spin(&self, rng: &mut SpinRng) -> usize {
        let roll = rng.roll_weight(self.total_weight);
        let mut cumulative = 0u64;
        for (i, symbol) in self.symbols.iter().enumerate() {
            cumulative += u64::from(symbol.weight);
            if roll <= cumulative {
                return i;
            }
        }
        // roll <= total_weight, so the scan always returns above.
        unreachable!("roll {roll} exceeded total weight {}", self.total_weight)
    }

    /// Circular lookup: any offset wraps around the strip.
    pub fn symbol_at(&self, index: usize) -> &Symbol {
        &self.symbols[index % self.symbols.len()]
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }
}
