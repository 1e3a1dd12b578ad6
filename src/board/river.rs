//! The river: a row of face-up decks shared by both players.
//!
//! Only the top card of each deck is visible and reachable. Decks are
//! persistent vectors so cloning a game for a rollout shares structure.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::card::Card;

/// Shared decks players develop from.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct River {
    decks: Vec<Vector<Card>>,
}

impl River {
    /// Deal `cards` into consecutive decks of `per_deck` cards.
    ///
    /// The first card of each chunk becomes that deck's top.
    #[must_use]
    pub fn deal(cards: &[Card], decks: usize, per_deck: usize) -> Self {
        let decks = (0..decks)
            .map(|i| {
                let start = (i * per_deck).min(cards.len());
                let end = (start + per_deck).min(cards.len());
                cards[start..end].iter().copied().collect()
            })
            .collect();
        Self { decks }
    }

    /// Number of decks.
    #[must_use]
    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    /// Top card of `deck`, if any.
    #[must_use]
    pub fn top(&self, deck: usize) -> Option<Card> {
        self.decks.get(deck).and_then(|d| d.front().copied())
    }

    /// Top cards of every deck.
    pub fn tops(&self) -> impl Iterator<Item = Option<Card>> + '_ {
        self.decks.iter().map(|d| d.front().copied())
    }

    /// Remove and return the top card of `deck`.
    pub fn draw(&mut self, deck: usize) -> Option<Card> {
        self.decks.get_mut(deck).and_then(Vector::pop_front)
    }

    #[must_use]
    pub fn is_empty(&self, deck: usize) -> bool {
        self.decks.get(deck).map_or(true, Vector::is_empty)
    }

    /// Cards remaining in each deck.
    #[must_use]
    pub fn cards_left(&self) -> Vec<usize> {
        self.decks.iter().map(Vector::len).collect()
    }

    /// Number of exhausted decks.
    #[must_use]
    pub fn empty_decks(&self) -> usize {
        self.decks.iter().filter(|d| d.is_empty()).count()
    }

    /// Number of decks that still hold cards.
    #[must_use]
    pub fn non_empty_decks(&self) -> usize {
        self.deck_count() - self.empty_decks()
    }

    /// Exchange the top cards of two decks. Returns false, leaving the
    /// river untouched, when either deck is empty.
    pub fn swap_tops(&mut self, a: usize, b: usize) -> bool {
        let (Some(top_a), Some(top_b)) = (self.top(a), self.top(b)) else {
            return false;
        };
        self.decks[a].set(0, top_b);
        self.decks[b].set(0, top_a);
        true
    }

    /// Discard the top cards of two decks; empty decks are skipped.
    pub fn discard_tops(&mut self, a: usize, b: usize) {
        self.draw(a);
        self.draw(b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn river() -> River {
        let cards = [
            Card::Naishi,
            Card::Fort,
            Card::Monk,
            Card::Torii,
            Card::Knight,
            Card::Banner,
        ];
        River::deal(&cards, 3, 2)
    }

    #[test]
    fn test_deal() {
        let r = river();
        assert_eq!(r.deck_count(), 3);
        assert_eq!(r.cards_left(), vec![2, 2, 2]);
        assert_eq!(r.top(0), Some(Card::Naishi));
        assert_eq!(r.top(2), Some(Card::Knight));
        assert_eq!(r.top(9), None);
    }

    #[test]
    fn test_draw_until_empty() {
        let mut r = river();
        assert_eq!(r.draw(1), Some(Card::Monk));
        assert_eq!(r.draw(1), Some(Card::Torii));
        assert_eq!(r.draw(1), None);
        assert!(r.is_empty(1));
        assert_eq!(r.empty_decks(), 1);
        assert_eq!(r.non_empty_decks(), 2);
    }

    #[test]
    fn test_swap_tops() {
        let mut r = river();
        assert!(r.swap_tops(0, 2));
        assert_eq!(r.top(0), Some(Card::Knight));
        assert_eq!(r.top(2), Some(Card::Naishi));
        assert_eq!(r.cards_left(), vec![2, 2, 2]);
    }

    #[test]
    fn test_swap_with_empty_deck_is_noop() {
        let mut r = river();
        r.draw(1);
        r.draw(1);
        let before = r.clone();
        assert!(!r.swap_tops(0, 1));
        assert_eq!(r, before);
    }

    #[test]
    fn test_discard_tops() {
        let mut r = river();
        r.discard_tops(0, 2);
        assert_eq!(r.top(0), Some(Card::Fort));
        assert_eq!(r.top(2), Some(Card::Banner));
        assert_eq!(r.cards_left(), vec![1, 2, 1]);
    }
}
