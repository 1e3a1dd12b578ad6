//! Error types for action validation, engine invariants, and configuration.
//!
//! `IllegalAction` and `MalformedAction` are recoverable: the engine
//! rejects the action before touching the state, so the caller can pick
//! another one. `InvariantViolation` means the engine itself is broken
//! and the game instance is aborted.

use thiserror::Error;

use crate::core::action::ActionKind;
use crate::rules::emissary::SpotKind;

/// Errors returned by the action processor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("illegal action ({}): {reason}", kind_label(.kind))]
    IllegalAction {
        /// Kind of the rejected action. `None` for skipping the emissary window.
        kind: Option<ActionKind>,
        reason: IllegalReason,
    },

    #[error("malformed action: {0}")]
    MalformedAction(#[from] MalformedAction),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    pub(crate) fn illegal(kind: ActionKind, reason: IllegalReason) -> Self {
        Self::IllegalAction {
            kind: Some(kind),
            reason,
        }
    }

    /// True for errors that leave the state untouched.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvariantViolation(_))
    }
}

fn kind_label(kind: &Option<ActionKind>) -> &'static str {
    kind.map_or("skip emissary", ActionKind::name)
}

/// Why a well-formed action is not legal in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalReason {
    #[error("the game is over")]
    GameOver,

    #[error("only draft actions are legal during the draft")]
    DraftInProgress,

    #[error("the draft is already complete")]
    DraftComplete,

    #[error("the draft still has unfilled choices")]
    DraftIncomplete,

    #[error("the previous emissary action requires a develop")]
    MustDevelop,

    #[error("only swap or discard may follow a develop")]
    EmissaryWindowOpen,

    #[error("no optional emissary window is open")]
    NoEmissaryWindow,

    #[error("no emissary in reserve")]
    NoReservedEmissary,

    #[error("no free {0} spot")]
    NoFreeSpot(SpotKind),

    #[error("river deck {0} is empty")]
    EmptyDeck(usize),

    #[error("fewer than two river decks hold cards")]
    NotEnoughDecks,

    #[error("no emissary is placed on a swap or discard spot")]
    NothingToRecall,

    #[error("the decree has already been used")]
    DecreeUsed,

    #[error("no river deck is empty yet")]
    EndingUnavailable,
}

/// Why an encoded action could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedAction {
    #[error("expected {expected} fields, got {got}")]
    WrongLength { expected: usize, got: usize },

    #[error("unknown action kind {0}")]
    UnknownKind(i64),

    #[error("{field} = {value} is outside 0..{bound}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        bound: usize,
    },

    #[error("{field} must name two different indices")]
    SameIndex { field: &'static str },

    #[error("{states} states but {actions} actions")]
    BatchLength { states: usize, actions: usize },
}

/// A player index outside the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("player index {0} is not a seat at a two-player table")]
pub struct InvalidPlayer(pub u8);

/// Errors that can occur when validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}
