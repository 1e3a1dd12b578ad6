//! Game state: the aggregate root.
//!
//! `GameState` owns everything a game needs: both territories, the
//! river, the emissary board, turn flags, the draft, the action history
//! and the RNG. Nothing is shared between two states, so a clone is an
//! independent game and states can be stepped on separate threads.
//!
//! Fields are crate-private. Callers read through accessors and mutate
//! only through the action processor (`apply_action`, `step`,
//! `skip_optional_emissary`), which lives in `rules::processor`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::config::NaishiConfig;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{River, Territory};
use crate::error::ConfigError;
use crate::rules::draft::DraftState;
use crate::rules::emissary::EmissaryBoard;
use crate::rules::result::GameResult;
use crate::rules::turn::{Phase, TurnState};

/// Complete state of one Naishi game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) config: NaishiConfig,

    // === Board ===
    pub(crate) territories: PlayerMap<Territory>,
    pub(crate) river: River,
    pub(crate) emissaries: EmissaryBoard,

    // === Turn progression ===
    pub(crate) current_player: PlayerId,
    /// Completed turns in the main loop (the draft does not count).
    pub(crate) turn_count: u32,
    pub(crate) turn: TurnState,
    /// `Some` while the draft is running.
    pub(crate) draft: Option<DraftState>,

    // === Game end ===
    /// At least one river deck is empty, so EndGame may be declared.
    pub(crate) ending_available: bool,
    /// The next completed turn ends the game.
    pub(crate) end_next_turn: bool,
    pub(crate) terminated: bool,
    pub(crate) truncated: bool,
    /// An engine invariant broke; the game accepts no more actions.
    pub(crate) aborted: bool,
    pub(crate) result: Option<GameResult>,

    // === Bookkeeping ===
    pub(crate) history: Vector<ActionRecord>,
    pub(crate) rng: GameRng,
}

impl GameState {
    /// Create a game with the default rules and run the draft setup.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(NaishiConfig::default(), seed)
    }

    /// Create a game with a custom configuration and run the draft setup.
    pub fn new(config: NaishiConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: NaishiConfig, seed: u64) -> Self {
        let mut state = Self {
            config,
            territories: PlayerMap::with_default(),
            river: River::deal(&[], config.decks, config.cards_per_deck),
            emissaries: EmissaryBoard::new(&config),
            current_player: PlayerId::FIRST,
            turn_count: 0,
            turn: TurnState::default(),
            draft: None,
            ending_available: false,
            end_next_turn: false,
            terminated: false,
            truncated: false,
            aborted: false,
            result: None,
            history: Vector::new(),
            rng: GameRng::new(seed),
        };
        state.setup_draft();
        state
    }

    // === Read-only views ===

    #[must_use]
    pub fn config(&self) -> &NaishiConfig {
        &self.config
    }

    /// The player whose decision is pending.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    #[must_use]
    pub fn turn_state(&self) -> &TurnState {
        &self.turn
    }

    #[must_use]
    pub fn territory(&self, player: PlayerId) -> &Territory {
        &self.territories[player]
    }

    #[must_use]
    pub fn river(&self) -> &River {
        &self.river
    }

    #[must_use]
    pub fn emissaries(&self) -> &EmissaryBoard {
        &self.emissaries
    }

    /// Draft progress, while the draft runs.
    #[must_use]
    pub fn draft(&self) -> Option<&DraftState> {
        self.draft.as_ref()
    }

    #[must_use]
    pub fn in_draft_phase(&self) -> bool {
        self.draft.is_some()
    }

    #[must_use]
    pub fn ending_available(&self) -> bool {
        self.ending_available
    }

    #[must_use]
    pub fn end_next_turn(&self) -> bool {
        self.end_next_turn
    }

    #[must_use]
    pub fn terminated(&self) -> bool {
        self.terminated
    }

    #[must_use]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    #[must_use]
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// True once no further action can be applied.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.terminated || self.truncated || self.aborted
    }

    /// Final result, once the game has terminated.
    #[must_use]
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Actions applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    /// Current state-machine phase, derived from the flags.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_over() {
            Phase::Terminated
        } else if self.draft.is_some() {
            Phase::Drafting
        } else if self.turn.optional_emissary_available {
            Phase::OptionalEmissaryWindow
        } else {
            Phase::AwaitingAction
        }
    }

    // === Serialization ===

    /// Binary snapshot for checkpointing or shipping to another process.
    pub fn snapshot(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a snapshot taken with [`GameState::snapshot`].
    pub fn restore(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Card;

    #[test]
    fn test_new_game_starts_in_draft() {
        let state = GameState::with_seed(42);

        assert_eq!(state.phase(), Phase::Drafting);
        assert_eq!(state.current_player(), PlayerId::FIRST);
        assert_eq!(state.turn_count(), 0);
        assert!(!state.is_over());
        assert_eq!(state.river().cards_left(), vec![6; 5]);
    }

    #[test]
    fn test_lines_start_as_mountains() {
        let state = GameState::with_seed(42);
        for player in PlayerId::all() {
            assert!(state.territory(player).line().iter().all(|&c| c == Card::Mountain));
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = NaishiConfig::default().with_initial_emissaries(0);
        assert!(GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_same_seed_same_setup() {
        assert_eq!(GameState::with_seed(9), GameState::with_seed(9));
        assert_ne!(GameState::with_seed(9), GameState::with_seed(10));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = GameState::with_seed(3);
        let mut copy = original.clone();
        copy.river.draw(0);

        assert_eq!(original.river().cards_left()[0], 6);
        assert_eq!(copy.river().cards_left()[0], 5);
    }

    #[test]
    fn test_snapshot_restore() {
        let state = GameState::with_seed(11);
        let bytes = state.snapshot().unwrap();
        let restored = GameState::restore(&bytes).unwrap();
        assert_eq!(state, restored);
    }

    #[test]
    fn test_restore_rejects_unknown_player() {
        let mut corrupt = GameState::with_seed(11);
        corrupt.current_player = PlayerId(2);
        let bytes = corrupt.snapshot().unwrap();
        assert!(GameState::restore(&bytes).is_err());

        let mut json = serde_json::to_value(GameState::with_seed(11)).unwrap();
        json["current_player"] = serde_json::json!(5);
        assert!(serde_json::from_value::<GameState>(json).is_err());
    }
}
