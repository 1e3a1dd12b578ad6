//! Naishi rules: the turn state machine and everything it drives.
//!
//! - `emissary`: token reserves and shared spots
//! - `turn`: per-turn flags and the derived phase
//! - `draft`: setup and the opening card exchange
//! - `processor`: legality, validation, and action application
//! - `batch`: parallel stepping of many games
//! - `result`: final outcome
//!
//! The processor is written as inherent methods on
//! [`GameState`](crate::core::GameState), so callers never need this
//! module to play a game.

pub mod batch;
pub mod draft;
pub mod emissary;
pub mod processor;
pub mod result;
pub mod turn;

pub use batch::{apply_action_array, new_games};
pub use draft::{DraftHand, DraftState};
pub use emissary::{EmissaryBoard, SpotKind};
pub use processor::{LegalKinds, StepInfo, Transition};
pub use result::GameResult;
pub use turn::{Phase, TurnState};
