//! Action representation: a closed set of kinds, each with its own payload.
//!
//! External drivers speak the fixed-shape array encoding
//!
//! ```text
//! [kind, pos, deck, swap_type, pos1, pos2, deck1, deck2]
//! ```
//!
//! which [`Action::decode`] turns into a typed [`Action`]. Fields a kind
//! does not use are ignored; fields it does use are range-checked, so a
//! bad array is rejected as `MalformedAction` instead of indexing out of
//! bounds later.
//!
//! ```
//! use naishi_engine::core::{Action, ActionKind, SwapKind};
//!
//! let action = Action::decode(&[2, 0, 0, 0, 1, 3, 0, 0]).unwrap();
//! assert_eq!(action, Action::Swap(SwapKind::Hand { a: 1, b: 3 }));
//! assert_eq!(action.kind(), ActionKind::Swap);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::board::territory::{CELLS, LINE_SIZE};
use crate::error::MalformedAction;

/// Number of fields in an encoded action.
pub const ENCODED_ACTION_LEN: usize = 8;

/// Array form consumed by training drivers.
pub type EncodedAction = [i64; ENCODED_ACTION_LEN];

/// Size of each encoded field, matching a `MultiDiscrete` action space.
pub const ACTION_DIMS: [usize; ENCODED_ACTION_LEN] = [7, 10, 5, 4, 5, 5, 5, 5];

/// The closed set of action kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionKind {
    Draft,
    Develop,
    Swap,
    Discard,
    Recall,
    Decree,
    EndGame,
}

impl ActionKind {
    /// Every kind in code order.
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Draft,
        ActionKind::Develop,
        ActionKind::Swap,
        ActionKind::Discard,
        ActionKind::Recall,
        ActionKind::Decree,
        ActionKind::EndGame,
    ];

    /// Integer code in the encoded form.
    #[must_use]
    pub const fn code(self) -> usize {
        self as usize
    }

    /// Decode an integer code.
    pub fn from_code(code: i64) -> Result<Self, MalformedAction> {
        usize::try_from(code)
            .ok()
            .and_then(|c| Self::ALL.get(c).copied())
            .ok_or(MalformedAction::UnknownKind(code))
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Draft => "Draft",
            ActionKind::Develop => "Develop",
            ActionKind::Swap => "Swap",
            ActionKind::Discard => "Discard",
            ActionKind::Recall => "Recall",
            ActionKind::Decree => "Decree",
            ActionKind::EndGame => "EndGame",
        }
    }

    /// Swap and Discard spend an emissary on a shared spot.
    #[must_use]
    pub const fn is_emissary(self) -> bool {
        matches!(self, ActionKind::Swap | ActionKind::Discard)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The four ways to spend an emissary on a swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwapKind {
    /// Two cards in the acting player's hand.
    Hand { a: u8, b: u8 },
    /// Two cards in the acting player's line.
    Line { a: u8, b: u8 },
    /// The line and hand cards of one column.
    Column { column: u8 },
    /// The top cards of two river decks.
    River { a: u8, b: u8 },
}

/// A fully decoded action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Give away draft card `give` (0 or 1 with the default rules).
    Draft { give: u8 },
    /// Replace territory cell `cell` with the top card of deck `cell % 5`.
    Develop { cell: u8 },
    Swap(SwapKind),
    /// Discard the top cards of decks `a` and `b`.
    Discard { a: u8, b: u8 },
    Recall,
    /// Exchange territory cell `cell` with the opponent's same cell.
    Decree { cell: u8 },
    EndGame,
}

fn field(raw: &[i64], index: usize, name: &'static str, bound: usize) -> Result<u8, MalformedAction> {
    let value = raw[index];
    if value < 0 || value as usize >= bound {
        return Err(MalformedAction::OutOfRange { field: name, value, bound });
    }
    Ok(value as u8)
}

fn distinct_pair(
    raw: &[i64],
    first: (usize, &'static str),
    second: (usize, &'static str),
    bound: usize,
    name: &'static str,
) -> Result<(u8, u8), MalformedAction> {
    let a = field(raw, first.0, first.1, bound)?;
    let b = field(raw, second.0, second.1, bound)?;
    if a == b {
        return Err(MalformedAction::SameIndex { field: name });
    }
    Ok((a, b))
}

impl Action {
    /// Kind tag of this action.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Action::Draft { .. } => ActionKind::Draft,
            Action::Develop { .. } => ActionKind::Develop,
            Action::Swap(_) => ActionKind::Swap,
            Action::Discard { .. } => ActionKind::Discard,
            Action::Recall => ActionKind::Recall,
            Action::Decree { .. } => ActionKind::Decree,
            Action::EndGame => ActionKind::EndGame,
        }
    }

    /// Decode the array form. The slice must hold exactly eight fields.
    pub fn decode(raw: &[i64]) -> Result<Self, MalformedAction> {
        if raw.len() != ENCODED_ACTION_LEN {
            return Err(MalformedAction::WrongLength {
                expected: ENCODED_ACTION_LEN,
                got: raw.len(),
            });
        }

        let action = match ActionKind::from_code(raw[0])? {
            ActionKind::Draft => Action::Draft {
                // The draft size is a config setting, checked on apply.
                give: field(raw, 1, "pos", ACTION_DIMS[1])?,
            },
            ActionKind::Develop => Action::Develop {
                cell: field(raw, 1, "pos", CELLS)?,
            },
            ActionKind::Swap => {
                let kind = match field(raw, 3, "swap_type", 4)? {
                    0 => {
                        let (a, b) = distinct_pair(raw, (4, "pos1"), (5, "pos2"), LINE_SIZE, "pos1/pos2")?;
                        SwapKind::Hand { a, b }
                    }
                    1 => {
                        let (a, b) = distinct_pair(raw, (4, "pos1"), (5, "pos2"), LINE_SIZE, "pos1/pos2")?;
                        SwapKind::Line { a, b }
                    }
                    2 => SwapKind::Column {
                        column: field(raw, 4, "pos1", LINE_SIZE)?,
                    },
                    _ => {
                        let (a, b) = distinct_pair(raw, (4, "pos1"), (5, "pos2"), LINE_SIZE, "pos1/pos2")?;
                        SwapKind::River { a, b }
                    }
                };
                Action::Swap(kind)
            }
            ActionKind::Discard => {
                let (a, b) = distinct_pair(raw, (6, "deck1"), (7, "deck2"), LINE_SIZE, "deck1/deck2")?;
                Action::Discard { a, b }
            }
            ActionKind::Recall => Action::Recall,
            ActionKind::Decree => Action::Decree {
                cell: field(raw, 1, "pos", CELLS)?,
            },
            ActionKind::EndGame => Action::EndGame,
        };

        Ok(action)
    }

    /// Encode to the array form. Unused fields are zero.
    #[must_use]
    pub fn encode(&self) -> EncodedAction {
        let mut raw = [0i64; ENCODED_ACTION_LEN];
        raw[0] = self.kind().code() as i64;
        match *self {
            Action::Draft { give } => raw[1] = i64::from(give),
            Action::Develop { cell } | Action::Decree { cell } => raw[1] = i64::from(cell),
            Action::Swap(kind) => {
                let (swap_type, a, b) = match kind {
                    SwapKind::Hand { a, b } => (0, a, b),
                    SwapKind::Line { a, b } => (1, a, b),
                    SwapKind::Column { column } => (2, column, 0),
                    SwapKind::River { a, b } => (3, a, b),
                };
                raw[3] = swap_type;
                raw[4] = i64::from(a);
                raw[5] = i64::from(b);
            }
            Action::Discard { a, b } => {
                raw[6] = i64::from(a);
                raw[7] = i64::from(b);
            }
            Action::Recall | Action::EndGame => {}
        }
        raw
    }

    /// River decks this action reads, for precondition checks.
    #[must_use]
    pub fn river_targets(&self) -> SmallVec<[usize; 2]> {
        match *self {
            Action::Develop { cell } => SmallVec::from_slice(&[cell as usize % LINE_SIZE]),
            Action::Swap(SwapKind::River { a, b }) | Action::Discard { a, b } => {
                SmallVec::from_slice(&[a as usize, b as usize])
            }
            _ => SmallVec::new(),
        }
    }
}

/// One entry in a game's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// An action applied through `apply_action`.
    Act(Action),
    /// The optional emissary window was declined.
    SkipEmissary,
}

impl Decision {
    /// The applied action, if this entry is one.
    #[must_use]
    pub const fn action(&self) -> Option<Action> {
        match self {
            Decision::Act(action) => Some(*action),
            Decision::SkipEmissary => None,
        }
    }
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        Decision::Act(action)
    }
}

/// A recorded decision with metadata for history tracking.
///
/// Used for replay, debugging, and training data. Feeding every
/// `decision` of a history to `GameState::apply_decision` on a state
/// built from the same seed and config reproduces the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who decided.
    pub player: PlayerId,

    /// What the player did.
    pub decision: Decision,

    /// Turn number when the decision was made (draft actions use 0).
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, decision: impl Into<Decision>, turn: u32) -> Self {
        Self {
            player,
            decision: decision.into(),
            turn,
        }
    }
}
