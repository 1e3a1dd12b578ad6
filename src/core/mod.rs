//! Core engine types: players, cards, actions, RNG, configuration, state.

pub mod action;
pub mod card;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{
    Action, ActionKind, ActionRecord, Decision, EncodedAction, SwapKind, ACTION_DIMS,
    ENCODED_ACTION_LEN,
};
pub use card::{Card, CARD_KINDS, EMPTY_CODE};
pub use config::NaishiConfig;
pub use player::{PlayerId, PlayerMap, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
