//! Symbol catalog entries.
//!
//! A symbol is pure data: the wild is just another name that the
//! evaluators treat specially.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(rename = "Name", alias = "name")]
    pub name:   String,
    /// Relative selection mass on its reel.
    #[serde(rename = "Weight", alias = "weight")]
    pub weight: u32,
    #[serde(rename = "Index", alias = "index", default)]
    pub index:  u32,
}

impl Symbol {
    pub fn new(name: impl Into<String>, weight: u32, index: u32) -> Self {
        Self { name: name.into(), weight, index }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
