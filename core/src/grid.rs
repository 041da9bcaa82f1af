//! The visible reel window for one round.
//!
//! A grid borrows symbol names from the reels it was spun from, so it
//! cannot outlive the engine and is dropped as soon as the round is scored.

use crate::{
    error::{SimError, SimResult},
    reel::Reel,
    rng::SpinRng,
    types::GRID_ROWS,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<'a> {
    columns: usize,
    /// Row-major, GRID_ROWS * columns entries.
    cells:   Vec<&'a str>,
}

impl<'a> Grid<'a> {
    /// Spin every reel once and read three consecutive stops per column:
    /// top = stop, middle = stop + 1, bottom = stop + 2 (all wrapping).
    pub fn spin(reels: &'a [Reel], rng: &mut SpinRng) -> Self {
        let columns = reels.len();
        let mut cells = vec![""; GRID_ROWS * columns];
        for (col, reel) in reels.iter().enumerate() {
            let stop = reel.spin(rng);
            for row in 0..GRID_ROWS {
                cells[row * columns + col] = reel.symbol_at(stop + row).name.as_str();
            }
        }
        Self { columns, cells }
    }

    /// Build a grid from explicit rows. Every row must have the same width
    /// and there must be exactly GRID_ROWS rows.
    pub fn from_rows<R: AsRef<[&'a str]>>(rows: &[R]) -> SimResult<Self> {
        let columns = rows.first().map_or(0, |r| r.as_ref().len());
        if rows.len() != GRID_ROWS {
            return Err(SimError::GridRowCount { expected: GRID_ROWS, actual: rows.len() });
        }
        let mut cells = Vec::with_capacity(GRID_ROWS * columns);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != columns {
                return Err(SimError::RaggedGrid { row, expected: columns, actual: values.len() });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self { columns, cells })
    }

    pub fn rows(&self) -> usize {
        GRID_ROWS
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Panics if (row, col) is outside the grid. Paylines are bounds-checked
    /// at engine construction.
    pub fn get(&self, row: usize, col: usize) -> &'a str {
        assert!(row < GRID_ROWS && col < self.columns, "({row}, {col}) outside grid");
        self.cells[row * self.columns + col]
    }

    /// The three cells of one reel, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = &'a str> + '_ {
        (0..GRID_ROWS).map(move |row| self.get(row, col))
    }
}
