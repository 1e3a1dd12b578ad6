//! Per-turn flags and the phase they imply.
//!
//! A main-loop turn is one of:
//!
//! ```text
//! Develop                       (no emissary usable afterwards)
//! Develop -> Swap | Discard     (optional emissary window)
//! Develop -> skip               (window declined)
//! Swap | Discard -> Develop     (emissary first, develop required)
//! Recall | Decree | EndGame
//! ```
//!
//! `TurnState` tracks where the current player is inside that sequence.
//! It is reset only when the turn passes to the other player.

use serde::{Deserialize, Serialize};

use crate::core::action::ActionKind;

/// Coarse state-machine position of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players are choosing which draft card to give away.
    Drafting,
    /// The current player picks a main action.
    AwaitingAction,
    /// The current player developed and may add Swap or Discard, or skip.
    OptionalEmissaryWindow,
    /// No more actions are accepted.
    Terminated,
}

/// Flags scoped to the current player's turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnState {
    /// A develop was just played and an emissary action may follow.
    pub optional_emissary_available: bool,
    /// An emissary action was played first, so Develop must follow.
    pub must_develop: bool,
    /// Kind of the last action this turn.
    pub last_action_type: Option<ActionKind>,
}

impl TurnState {
    /// The state a fresh turn starts from.
    #[must_use]
    pub fn clear_turn_state(self) -> Self {
        Self::default()
    }

    /// True when no action has been taken this turn.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        *self == Self::default()
    }

    /// Both flags set at once can never happen in a legal game.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        !(self.optional_emissary_available && self.must_develop)
    }
}
