//! State encoding for neural network input.
//!
//! Transforms a game state into the flat float vector a policy network
//! reads, and builds the action mask for a `MultiDiscrete` action head.

use serde::{Deserialize, Serialize};

use crate::board::territory::{HAND_SIZE, LINE_SIZE};
use crate::core::action::{ActionKind, ACTION_DIMS};
use crate::core::card::{encode_slot, Card, EMPTY_CODE};
use crate::core::player::{PlayerId, PLAYER_COUNT};
use crate::core::state::GameState;
use crate::rules::emissary::SpotKind;

/// Encoded game state as a flat tensor for neural network input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.tensor
    }
}

/// Encodes game state into tensors for neural network input.
///
/// The encoding must hide information not visible to `perspective`:
/// the opponent's hand and draft cards are never encoded.
pub trait StateEncoder: Send + Sync {
    /// Encode the game state from a player's perspective.
    fn encode(&self, state: &GameState, perspective: PlayerId) -> EncodedState;

    /// Shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Flat mask over the concatenated `MultiDiscrete` action fields.
    fn action_mask(&self, state: &GameState) -> Vec<bool>;

    #[must_use]
    fn player_count(&self) -> usize {
        PLAYER_COUNT
    }
}

/// Length of a [`NaishiEncoder`] observation.
pub const OBSERVATION_LEN: usize = 36;

/// Length of the flat action mask.
pub const ACTION_MASK_LEN: usize = {
    let mut total = 0;
    let mut i = 0;
    while i < ACTION_DIMS.len() {
        total += ACTION_DIMS[i];
        i += 1;
    }
    total
};

/// The standard Naishi observation.
///
/// Layout, always from the perspective player's side of the table:
///
/// ```text
///  0..5   own line            card codes
///  5..10  own hand            card codes; draft cards then Empty during the draft
/// 10..15  opponent line       card codes
/// 15..20  river tops          card codes, Empty for an exhausted deck
/// 20..25  cards left per deck
/// 25, 26  own / opponent emissaries in reserve
/// 27, 28  own / opponent holds the decree
/// 29      turn count / turn_scale, capped at 1
/// 30      must develop
/// 31      ending available
/// 32, 33  a swap / discard spot is free
/// 34      drafting
/// 35      optional emissary window open
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NaishiEncoder {
    turn_scale: f32,
}

impl Default for NaishiEncoder {
    fn default() -> Self {
        Self { turn_scale: 50.0 }
    }
}

impl NaishiEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the turn count that maps to 1.0.
    #[must_use]
    pub fn with_turn_scale(mut self, turn_scale: f32) -> Self {
        self.turn_scale = turn_scale;
        self
    }

    fn hand_codes(state: &GameState, perspective: PlayerId) -> [f32; HAND_SIZE] {
        let mut codes = [f32::from(EMPTY_CODE); HAND_SIZE];
        match state.draft() {
            Some(draft) => {
                for (slot, &card) in codes.iter_mut().zip(draft.hand(perspective)) {
                    *slot = f32::from(card.code());
                }
            }
            None => {
                for (slot, &card) in codes.iter_mut().zip(state.territory(perspective).hand()) {
                    *slot = f32::from(card.code());
                }
            }
        }
        codes
    }
}

fn codes(cards: &[Card]) -> impl Iterator<Item = f32> + '_ {
    cards.iter().map(|c| f32::from(c.code()))
}

fn flag(value: bool) -> f32 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl StateEncoder for NaishiEncoder {
    fn encode(&self, state: &GameState, perspective: PlayerId) -> EncodedState {
        let opponent = perspective.opponent();
        let emissaries = state.emissaries();
        let river = state.river();

        let mut tensor = Vec::with_capacity(OBSERVATION_LEN);
        tensor.extend(codes(state.territory(perspective).line()));
        tensor.extend(Self::hand_codes(state, perspective));
        tensor.extend(codes(state.territory(opponent).line()));
        tensor.extend(river.tops().map(|top| f32::from(encode_slot(top))));
        tensor.extend(river.cards_left().into_iter().map(|n| n as f32));

        tensor.push(f32::from(emissaries.reserve(perspective)));
        tensor.push(f32::from(emissaries.reserve(opponent)));
        tensor.push(flag(emissaries.decree_holder() == Some(perspective)));
        tensor.push(flag(emissaries.decree_holder() == Some(opponent)));
        tensor.push((state.turn_count() as f32 / self.turn_scale).min(1.0));

        let turn = state.turn_state();
        tensor.push(flag(turn.must_develop));
        tensor.push(flag(state.ending_available()));
        tensor.push(flag(emissaries.has_free(SpotKind::Swap)));
        tensor.push(flag(emissaries.has_free(SpotKind::Discard)));
        tensor.push(flag(state.in_draft_phase()));
        tensor.push(flag(turn.optional_emissary_available));

        debug_assert_eq!(tensor.len(), OBSERVATION_LEN, "river must have {LINE_SIZE} decks");
        EncodedState::new(tensor, vec![OBSERVATION_LEN])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![OBSERVATION_LEN]
    }

    /// The kind segment is exact. Parameter segments are all true:
    /// parameters are validated when the action is applied.
    fn action_mask(&self, state: &GameState) -> Vec<bool> {
        let mut mask = vec![true; ACTION_MASK_LEN];
        let kinds = &mut mask[..ACTION_DIMS[0]];
        kinds.fill(false);
        for kind in state.legal_action_types() {
            kinds[kind.code()] = true;
        }
        mask
    }
}

/// Whether `kind` is enabled in a mask built by [`StateEncoder::action_mask`].
#[must_use]
pub fn mask_allows(mask: &[bool], kind: ActionKind) -> bool {
    mask.get(kind.code()).copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Action;

    fn drafted(seed: u64) -> GameState {
        let mut state = GameState::with_seed(seed);
        state.apply_action(Action::Draft { give: 0 }).unwrap();
        state.apply_action(Action::Draft { give: 1 }).unwrap();
        state
    }

    #[test]
    fn test_mask_len() {
        assert_eq!(ACTION_MASK_LEN, 46);
    }

    #[test]
    fn test_encoder_shape() {
        let encoder = NaishiEncoder::new();
        let encoded = encoder.encode(&GameState::with_seed(1), PlayerId::FIRST);
        assert_eq!(encoded.len(), OBSERVATION_LEN);
        assert_eq!(encoder.output_shape(), vec![36]);
        assert_eq!(encoder.player_count(), 2);
    }

    #[test]
    fn test_draft_observation() {
        let state = GameState::with_seed(2);
        let draft = state.draft().unwrap();
        let obs = NaishiEncoder::new().encode(&state, PlayerId::SECOND);

        let mountain = f32::from(Card::Mountain.code());
        assert!(obs.as_slice()[..5].iter().all(|&v| v == mountain));
        assert_eq!(obs.get(5), Some(f32::from(draft.hand(PlayerId::SECOND)[0].code())));
        assert_eq!(obs.get(6), Some(f32::from(draft.hand(PlayerId::SECOND)[1].code())));
        assert_eq!(obs.get(7), Some(f32::from(EMPTY_CODE)));
        assert_eq!(obs.get(20), Some(6.0));
        assert_eq!(obs.get(25), Some(2.0));
        assert_eq!(obs.get(34), Some(1.0));
        assert_eq!(obs.get(35), Some(0.0));
    }

    #[test]
    fn test_main_observation() {
        let mut state = drafted(3);
        let top = state.river().top(0).unwrap();
        state.apply_action(Action::Develop { cell: 5 }).unwrap();

        let obs = NaishiEncoder::new().encode(&state, PlayerId::FIRST);
        assert_eq!(obs.get(5), Some(f32::from(top.code())));
        assert_eq!(obs.get(20), Some(5.0));
        assert_eq!(obs.get(34), Some(0.0));
        assert_eq!(obs.get(35), Some(1.0));
    }

    #[test]
    fn test_opponent_hand_hidden() {
        let mut a = drafted(4);
        let b = a.clone();
        a.territories[PlayerId::SECOND].set_hand([Card::Ninja; HAND_SIZE]);

        let encoder = NaishiEncoder::new();
        assert_eq!(encoder.encode(&a, PlayerId::FIRST), encoder.encode(&b, PlayerId::FIRST));
        assert_ne!(encoder.encode(&a, PlayerId::SECOND), encoder.encode(&b, PlayerId::SECOND));
    }

    #[test]
    fn test_turn_scale() {
        let mut state = drafted(5);
        state.turn_count = 80;
        let obs = NaishiEncoder::new().with_turn_scale(100.0).encode(&state, PlayerId::FIRST);
        assert_eq!(obs.get(29), Some(0.8));
        let capped = NaishiEncoder::new().encode(&state, PlayerId::FIRST);
        assert_eq!(capped.get(29), Some(1.0));
    }

    #[test]
    fn test_action_mask() {
        let mut state = drafted(6);
        state
            .apply_action(Action::Swap(crate::core::action::SwapKind::Column { column: 1 }))
            .unwrap();

        let mask = NaishiEncoder::new().action_mask(&state);
        assert_eq!(mask.len(), ACTION_MASK_LEN);
        assert!(mask_allows(&mask, ActionKind::Develop));
        for kind in [ActionKind::Draft, ActionKind::Swap, ActionKind::Recall, ActionKind::EndGame] {
            assert!(!mask_allows(&mask, kind));
        }
        assert!(mask[ACTION_DIMS[0]..].iter().all(|&m| m));
    }

    #[test]
    fn test_encoded_state_serialization() {
        let encoded = NaishiEncoder::new().encode(&drafted(7), PlayerId::SECOND);
        let json = serde_json::to_string(&encoded).unwrap();
        let back: EncodedState = serde_json::from_str(&json).unwrap();
        assert_eq!(encoded, back);
    }
}
