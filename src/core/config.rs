//! Game configuration.
//!
//! The defaults are the published Naishi rules. Every field can be
//! overridden, which is mostly useful for tests (shorter games, fewer
//! spots) and for curriculum-style training setups.
//!
//! ```
//! use naishi_engine::core::NaishiConfig;
//!
//! let config = NaishiConfig::default().with_max_turns(40);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::board::territory::{HAND_SIZE, LINE_SIZE};
use crate::error::ConfigError;

/// Complete game configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NaishiConfig {
    /// Emissary tokens each player starts with.
    pub initial_emissaries: u8,

    /// Shared spots available to swap actions.
    pub swap_spots: usize,

    /// Shared spots available to discard actions.
    pub discard_spots: usize,

    /// Number of river decks.
    pub decks: usize,

    /// Cards dealt to each river deck.
    pub cards_per_deck: usize,

    /// Cards dealt to each player for the draft.
    pub draft_cards: usize,

    /// Turns played before the game is truncated.
    pub max_turns: u32,
}

impl Default for NaishiConfig {
    fn default() -> Self {
        Self {
            initial_emissaries: 2,
            swap_spots: 3,
            discard_spots: 2,
            decks: 5,
            cards_per_deck: 6,
            draft_cards: 2,
            max_turns: 100,
        }
    }
}

impl NaishiConfig {
    /// Set the truncation threshold.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the starting number of emissaries per player.
    #[must_use]
    pub fn with_initial_emissaries(mut self, count: u8) -> Self {
        self.initial_emissaries = count;
        self
    }

    /// Set the number of shared swap and discard spots.
    #[must_use]
    pub fn with_spots(mut self, swap_spots: usize, discard_spots: usize) -> Self {
        self.swap_spots = swap_spots;
        self.discard_spots = discard_spots;
        self
    }

    /// Cards taken from the pool by the river and the draft.
    #[must_use]
    pub fn cards_needed(&self) -> usize {
        self.decks * self.cards_per_deck + 2 * self.draft_cards
    }

    /// Mountains added to each drafted hand to fill it.
    #[must_use]
    pub fn draft_mountains(&self) -> usize {
        HAND_SIZE.saturating_sub(self.draft_cards)
    }

    /// Check the configuration against the card pool and the board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pool = Card::pool().len();
        if self.cards_needed() > pool {
            return Err(ConfigError::Validation(format!(
                "river and draft need {} cards but the pool holds {pool}",
                self.cards_needed()
            )));
        }
        // Develop maps territory cells onto decks column by column.
        if self.decks != LINE_SIZE {
            return Err(ConfigError::Validation(format!(
                "decks must equal the line width {LINE_SIZE}, got {}",
                self.decks
            )));
        }
        if self.draft_cards < 1 || self.draft_cards > HAND_SIZE {
            return Err(ConfigError::Validation(format!(
                "draft_cards must be in 1..={HAND_SIZE}, got {}",
                self.draft_cards
            )));
        }
        if self.initial_emissaries == 0 {
            return Err(ConfigError::Validation(
                "initial_emissaries must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = NaishiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cards_needed(), 34);
        assert_eq!(config.draft_mountains(), 3);
    }

    #[test]
    fn test_builder() {
        let config = NaishiConfig::default()
            .with_max_turns(10)
            .with_initial_emissaries(1)
            .with_spots(1, 1);

        assert_eq!(config.max_turns, 10);
        assert_eq!(config.initial_emissaries, 1);
        assert_eq!(config.swap_spots, 1);
        assert_eq!(config.discard_spots, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pool_too_small() {
        let config = NaishiConfig {
            cards_per_deck: 7,
            ..NaishiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_zero_emissaries_rejected() {
        let config = NaishiConfig::default().with_initial_emissaries(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: NaishiConfig = serde_json::from_str(r#"{"max_turns": 30}"#).unwrap();
        assert_eq!(config.max_turns, 30);
        assert_eq!(config.swap_spots, 3);
    }
}
