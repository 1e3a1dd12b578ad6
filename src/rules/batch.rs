//! Batch stepping over many independent games.
//!
//! Games share nothing, so a batch is stepped in parallel with rayon.
//! Each game's outcome is reported separately: one illegal action does
//! not stop the rest of the batch.

use rayon::prelude::*;
use tracing::debug;

use crate::core::action::EncodedAction;
use crate::core::state::GameState;
use crate::error::{EngineError, MalformedAction};
use crate::rules::processor::Transition;

/// Start `count` games seeded `base_seed`, `base_seed + 1`, ...
#[must_use]
pub fn new_games(count: usize, base_seed: u64) -> Vec<GameState> {
    (0..count)
        .into_par_iter()
        .map(|i| GameState::with_seed(base_seed.wrapping_add(i as u64)))
        .collect()
}

/// Apply `actions[i]` to `states[i]` for every `i`.
///
/// Fails as a whole only when the two slices differ in length.
pub fn apply_action_array(
    states: &mut [GameState],
    actions: &[EncodedAction],
) -> Result<Vec<Result<Transition, EngineError>>, EngineError> {
    if states.len() != actions.len() {
        return Err(MalformedAction::BatchLength {
            states: states.len(),
            actions: actions.len(),
        }
        .into());
    }

    debug!(games = states.len(), "stepping batch");
    Ok(states
        .par_iter_mut()
        .zip(actions.par_iter())
        .map(|(state, action)| state.step(action))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::Action;

    #[test]
    fn test_new_games_seeded() {
        let games = new_games(4, 100);
        assert_eq!(games.len(), 4);
        assert_eq!(games[2], GameState::with_seed(102));
    }

    #[test]
    fn test_batch_matches_sequential() {
        let mut batch = new_games(8, 7);
        let mut sequential = batch.clone();
        let actions = vec![Action::Draft { give: 1 }.encode(); 8];

        let results = apply_action_array(&mut batch, &actions).unwrap();
        for (state, action) in sequential.iter_mut().zip(&actions) {
            state.step(action).unwrap();
        }

        assert!(results.iter().all(Result::is_ok));
        assert_eq!(batch, sequential);
    }

    #[test]
    fn test_batch_isolates_failures() {
        let mut batch = new_games(3, 1);
        let mut actions = vec![Action::Draft { give: 0 }.encode(); 3];
        actions[1] = Action::EndGame.encode();

        let results = apply_action_array(&mut batch, &actions).unwrap();
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert_eq!(batch[1], GameState::with_seed(2));
    }

    #[test]
    fn test_length_mismatch() {
        let mut batch = new_games(2, 1);
        let err = apply_action_array(&mut batch, &[Action::Recall.encode()]).unwrap_err();
        assert_eq!(
            err,
            EngineError::MalformedAction(MalformedAction::BatchLength { states: 2, actions: 1 })
        );
    }
}
