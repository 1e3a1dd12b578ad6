//! A player's territory: the line above, the hand below.
//!
//! ```text
//! line:  0  1  2  3  4
//! hand:  5  6  7  8  9
//! ```
//!
//! Both rows are always full. Mountains fill the line at setup and the
//! drafted hand is padded with Mountains, so a cell is never empty.

use serde::{Deserialize, Serialize};

use super::grid::{Grid, Region};
use crate::core::card::Card;

/// Cards in the line (top row).
pub const LINE_SIZE: usize = 5;
/// Cards in the hand (bottom row).
pub const HAND_SIZE: usize = 5;
/// Cells in a territory.
pub const CELLS: usize = LINE_SIZE + HAND_SIZE;
/// The territory topology.
pub const TERRITORY_GRID: Grid = Grid::new(2, LINE_SIZE);

/// Ten cards laid out on the territory grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Territory {
    cells: [Card; CELLS],
}

impl Default for Territory {
    fn default() -> Self {
        Self {
            cells: [Card::Mountain; CELLS],
        }
    }
}

impl Territory {
    /// Build a territory from its line and hand.
    #[must_use]
    pub fn new(line: [Card; LINE_SIZE], hand: [Card; HAND_SIZE]) -> Self {
        let mut cells = [Card::Mountain; CELLS];
        cells[..LINE_SIZE].copy_from_slice(&line);
        cells[LINE_SIZE..].copy_from_slice(&hand);
        Self { cells }
    }

    /// Build a territory from all ten cells, line first.
    #[must_use]
    pub fn from_cells(cells: [Card; CELLS]) -> Self {
        Self { cells }
    }

    /// All ten cells, line first.
    #[must_use]
    pub fn cells(&self) -> &[Card; CELLS] {
        &self.cells
    }

    #[must_use]
    pub fn line(&self) -> &[Card] {
        &self.cells[..LINE_SIZE]
    }

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.cells[LINE_SIZE..]
    }

    #[must_use]
    pub fn get(&self, cell: usize) -> Card {
        self.cells[cell]
    }

    /// Put `card` on `cell`, returning the card it covers.
    pub fn replace(&mut self, cell: usize, card: Card) -> Card {
        std::mem::replace(&mut self.cells[cell], card)
    }

    /// Replace the whole hand.
    pub fn set_hand(&mut self, hand: [Card; HAND_SIZE]) {
        self.cells[LINE_SIZE..].copy_from_slice(&hand);
    }

    pub fn swap_in_hand(&mut self, a: usize, b: usize) {
        self.cells.swap(LINE_SIZE + a, LINE_SIZE + b);
    }

    pub fn swap_in_line(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// Exchange the line and hand cards of one column.
    pub fn swap_column(&mut self, column: usize) {
        self.cells.swap(column, LINE_SIZE + column);
    }

    /// Number of cells holding `card`.
    #[must_use]
    pub fn count(&self, card: Card) -> usize {
        self.cells.iter().filter(|&&c| c == card).count()
    }

    /// Connected groups of `card` on the territory grid.
    #[must_use]
    pub fn regions_of(&self, card: Card) -> Vec<Region> {
        let occupied: Vec<bool> = self.cells.iter().map(|&c| c == card).collect();
        TERRITORY_GRID.compute_regions(&occupied)
    }
}
