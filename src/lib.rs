//! # naishi-engine
//!
//! Rules engine for Naishi, a two-player card-drafting game, built to be
//! driven by reinforcement-learning and search code.
//!
//! ## Design Principles
//!
//! 1. **One Aggregate Root**: [`GameState`] owns the whole game. Clones
//!    are independent, so rollouts and parallel batches need no locking.
//!
//! 2. **Validate, Then Mutate**: an action is fully checked before any
//!    field changes. A rejected action returns an error and leaves the
//!    state equal to what it was.
//!
//! 3. **Deterministic**: all randomness comes from the state's seeded
//!    [`GameRng`]. The same seed and action sequence give the same game.
//!
//! ## Modules
//!
//! - `core`: players, cards, actions, RNG, configuration, `GameState`
//! - `board`: the territory grid, region detection, the river
//! - `rules`: emissaries, turn flags, draft, the action processor, batches
//! - `scoring`: per-card scoring tables and the winner
//! - `nn`: observation encoding and action masks
//!
//! ## Example
//!
//! ```
//! use naishi_engine::{Action, GameState, Phase};
//!
//! let mut game = GameState::with_seed(42);
//! game.apply_action(Action::Draft { give: 0 }).unwrap();
//! game.apply_action(Action::Draft { give: 1 }).unwrap();
//!
//! let step = game.apply_action(Action::Develop { cell: 5 }).unwrap();
//! if step.info.phase == Phase::OptionalEmissaryWindow {
//!     game.skip_optional_emissary().unwrap();
//! }
//! assert_eq!(game.turn_count(), 1);
//! ```

pub mod board;
pub mod core;
pub mod error;
pub mod nn;
pub mod rules;
pub mod scoring;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionKind, ActionRecord, Card, Decision, EncodedAction, GameRng, GameRngState, GameState,
    NaishiConfig, PlayerId, PlayerMap, SwapKind,
};

pub use crate::board::{Grid, Region, River, Territory};

pub use crate::error::{ConfigError, EngineError, IllegalReason, InvalidPlayer, MalformedAction};

pub use crate::rules::{
    apply_action_array, GameResult, LegalKinds, Phase, SpotKind, StepInfo, Transition, TurnState,
};

pub use crate::scoring::{calculate_score, BestCopy, NinjaChooser, NoCopy, ScoreBreakdown};

pub use crate::nn::{EncodedState, NaishiEncoder, StateEncoder};
