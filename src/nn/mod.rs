//! Neural network integration.
//!
//! `StateEncoder` turns a [`GameState`](crate::core::GameState) into the
//! flat observation a policy network reads; `NaishiEncoder` is the
//! standard 36-float encoding with a 46-entry `MultiDiscrete` action
//! mask.
//!
//! ```
//! use naishi_engine::core::{GameState, PlayerId};
//! use naishi_engine::nn::{NaishiEncoder, StateEncoder};
//!
//! let state = GameState::with_seed(7);
//! let encoder = NaishiEncoder::new();
//! let obs = encoder.encode(&state, PlayerId::FIRST);
//! assert_eq!(obs.len(), 36);
//! assert_eq!(encoder.action_mask(&state).len(), 46);
//! ```

pub mod encoder;

pub use encoder::{
    mask_allows, EncodedState, NaishiEncoder, StateEncoder, ACTION_MASK_LEN, OBSERVATION_LEN,
};
