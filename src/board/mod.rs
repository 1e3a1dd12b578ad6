//! Board structures: the territory grid each player builds, the region
//! scan used for scoring, and the shared river of decks.

pub mod grid;
pub mod river;
pub mod territory;

pub use grid::{Grid, Region};
pub use river::River;
pub use territory::{Territory, CELLS, HAND_SIZE, LINE_SIZE, TERRITORY_GRID};
