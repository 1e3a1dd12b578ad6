//! Final outcome of a game.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal score and equal distinct-card count.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// Terminal reward seen by `player`: +1 win, -1 loss, 0 draw.
    #[must_use]
    pub fn reward_for(&self, player: PlayerId) -> f32 {
        match self {
            GameResult::Winner(p) if *p == player => 1.0,
            GameResult::Winner(_) => -1.0,
            GameResult::Draw => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_winner() {
        let result = GameResult::Winner(PlayerId::SECOND);
        assert!(result.is_winner(PlayerId::SECOND));
        assert!(!result.is_winner(PlayerId::FIRST));
        assert!(!GameResult::Draw.is_winner(PlayerId::FIRST));
    }

    #[test]
    fn test_rewards() {
        let result = GameResult::Winner(PlayerId::FIRST);
        assert_eq!(result.reward_for(PlayerId::FIRST), 1.0);
        assert_eq!(result.reward_for(PlayerId::SECOND), -1.0);
        assert_eq!(GameResult::Draw.reward_for(PlayerId::SECOND), 0.0);
    }
}
