//! Game definition parsing.
//!
//! RULE: The core never touches the filesystem. Callers read the JSON
//! files and hand the text in; everything here is parse + validate.
//!
//! File shapes:
//!   Reels.json     {"Reels": [[{"Name": "A", "Weight": 5, "Index": 0}, ...], ...]}
//!   Paytable.json  {"A": [0, 0, 5, 20, 50], ...}
//!   Paylines.json  [[[row, col], ...], ...]   (0-indexed)

use crate::{
    engine::{EngineSettings, SimEngine},
    error::{SimError, SimResult},
    evaluator::EvaluationMode,
    lines::Payline,
    paytable::PayoutTable,
    reel::Reel,
    symbol::Symbol,
    types::Credits,
};
use serde::Deserialize;
use std::{collections::HashMap, str::FromStr};

#[derive(Debug, Clone, Deserialize)]
struct ReelsFile {
    #[serde(rename = "Reels", alias = "reels")]
    reels: Vec<Vec<Symbol>>,
}

/// Which evaluation scheme to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Lines,
    Ways,
}

impl FromStr for ModeKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lines" => Ok(Self::Lines),
            "ways"  => Ok(Self::Ways),
            other   => Err(anyhow::anyhow!("unknown mode '{other}', expected lines or ways").into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub reels:    Vec<Vec<Symbol>>,
    pub paytable: HashMap<String, Vec<Credits>>,
    /// Only required in lines mode.
    pub paylines: Option<Vec<Payline>>,
}

impl GameConfig {
    pub fn from_json(
        reels_json: &str,
        paytable_json: &str,
        paylines_json: Option<&str>,
    ) -> SimResult<Self> {
        Ok(Self {
            reels:    parse_reels(reels_json)?,
            paytable: parse_paytable(paytable_json)?,
            paylines: paylines_json.map(parse_paylines).transpose()?,
        })
    }

    /// Validate everything and build an engine.
    pub fn build_engine(&self, mode: ModeKind, settings: EngineSettings) -> SimResult<SimEngine> {
        let reels = self
            .reels
            .iter()
            .enumerate()
            .map(|(index, symbols)| Reel::new(index, symbols.clone()))
            .collect::<SimResult<Vec<_>>>()?;
        let paytable = PayoutTable::new(self.paytable.clone())?;
        let mode = match mode {
            ModeKind::Lines => EvaluationMode::Lines(self.paylines.clone().ok_or(SimError::NoPaylines)?),
            ModeKind::Ways  => EvaluationMode::Ways,
        };
        SimEngine::new(reels, paytable, mode, settings)
    }

    /// Config with hardcoded defaults for use in tests.
    /// Five reels, seven symbols, the standard 20 lines.
    pub fn default_test() -> Self {
        let strip = |weights: [u32; 7]| -> Vec<Symbol> {
            ["WW", "H1", "H2", "A", "K", "Q", "J"]
                .iter()
                .zip(weights)
                .enumerate()
                .map(|(i, (name, weight))| Symbol::new(*name, weight, i as u32))
                .collect()
        };

        let reels = vec![
            strip([2, 4, 6, 10, 12, 14, 16]),
            strip([2, 4, 6, 10, 12, 14, 16]),
            strip([3, 4, 6, 10, 12, 14, 16]),
            strip([3, 5, 7, 10, 12, 14, 16]),
            strip([3, 5, 7, 10, 12, 14, 16]),
        ];

        let paytable = [
            ("WW", vec![0, 0, 50, 200, 1000]),
            ("H1", vec![0, 0, 25, 100, 400]),
            ("H2", vec![0, 0, 20, 75, 250]),
            ("A",  vec![0, 0, 10, 30, 100]),
            ("K",  vec![0, 0, 8, 25, 80]),
            ("Q",  vec![0, 0, 5, 15, 60]),
            ("J",  vec![0, 0, 5, 10, 50]),
        ]
        .into_iter()
        .map(|(name, pays)| (name.to_string(), pays))
        .collect();

        Self {
            reels,
            paytable,
            paylines: Some(standard_paylines()),
        }
    }
}

pub fn parse_reels(json: &str) -> SimResult<Vec<Vec<Symbol>>> {
    let file: ReelsFile = serde_json::from_str(json)?;
    if file.reels.is_empty() {
        return Err(SimError::NoReels);
    }
    Ok(file.reels)
}

pub fn parse_paytable(json: &str) -> SimResult<HashMap<String, Vec<Credits>>> {
    let table: HashMap<String, Vec<Credits>> = serde_json::from_str(json)?;
    if table.is_empty() {
        return Err(SimError::EmptyPayoutTable);
    }
    Ok(table)
}

pub fn parse_paylines(json: &str) -> SimResult<Vec<Payline>> {
    let lines: Vec<Payline> = serde_json::from_str(json)?;
    if lines.is_empty() {
        return Err(SimError::NoPaylines);
    }
    Ok(lines)
}

/// The usual 20 paylines for a 5x3 window, as one row per reel.
pub fn standard_paylines() -> Vec<Payline> {
    const ROWS: [[usize; 5]; 20] = [
        [1, 1, 1, 1, 1],
        [0, 0, 0, 0, 0],
        [2, 2, 2, 2, 2],
        [0, 1, 2, 1, 0],
        [2, 1, 0, 1, 2],
        [0, 0, 1, 2, 2],
        [2, 2, 1, 0, 0],
        [1, 0, 0, 0, 1],
        [1, 2, 2, 2, 1],
        [0, 1, 0, 1, 0],
        [2, 1, 2, 1, 2],
        [0, 1, 1, 1, 0],
        [2, 1, 1, 1, 2],
        [1, 1, 0, 1, 1],
        [1, 1, 2, 1, 1],
        [0, 2, 0, 2, 0],
        [2, 0, 2, 0, 2],
        [1, 0, 1, 0, 1],
        [1, 2, 1, 2, 1],
        [0, 0, 2, 0, 0],
    ];
    ROWS.iter().map(|rows| Payline::from_rows(rows)).collect()
}
