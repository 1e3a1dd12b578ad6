//! Card kinds and the fixed card pool.
//!
//! Every card is identified by its kind alone: the pool holds several
//! copies of most kinds and copies are interchangeable. Mountains are not
//! part of the shuffled pool; they are handed out at setup.

use serde::{Deserialize, Serialize};

/// A Naishi card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Card {
    Naishi,
    Councellor,
    Sentinel,
    Fort,
    Monk,
    Torii,
    Knight,
    Banner,
    RiceFields,
    Ronin,
    Ninja,
    Mountain,
}

/// Number of card kinds, Mountain included.
pub const CARD_KINDS: usize = 12;

/// Integer code of an empty slot in encoded observations.
pub const EMPTY_CODE: u8 = CARD_KINDS as u8;

impl Card {
    /// The shuffled kinds with their number of copies, in code order.
    pub const POOL: [(Card, usize); 11] = [
        (Card::Naishi, 2),
        (Card::Councellor, 4),
        (Card::Sentinel, 4),
        (Card::Fort, 4),
        (Card::Monk, 3),
        (Card::Torii, 4),
        (Card::Knight, 2),
        (Card::Banner, 2),
        (Card::RiceFields, 5),
        (Card::Ronin, 2),
        (Card::Ninja, 2),
    ];

    /// Every kind, Mountain included, in code order.
    pub const ALL: [Card; CARD_KINDS] = [
        Card::Naishi,
        Card::Councellor,
        Card::Sentinel,
        Card::Fort,
        Card::Monk,
        Card::Torii,
        Card::Knight,
        Card::Banner,
        Card::RiceFields,
        Card::Ronin,
        Card::Ninja,
        Card::Mountain,
    ];

    /// Build the unshuffled card pool.
    #[must_use]
    pub fn pool() -> Vec<Card> {
        Self::POOL
            .iter()
            .flat_map(|&(card, count)| std::iter::repeat(card).take(count))
            .collect()
    }

    /// Integer code used by observation encoders.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decode an integer code. `EMPTY_CODE` and unknown codes yield `None`.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Card> {
        Self::ALL.get(code as usize).copied()
    }

    /// Characters are the only cards a Ninja may copy.
    #[must_use]
    pub const fn is_character(self) -> bool {
        matches!(
            self,
            Card::Naishi | Card::Councellor | Card::Sentinel | Card::Monk | Card::Knight | Card::Ronin
        )
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Card::Naishi => "Naishi",
            Card::Councellor => "Councellor",
            Card::Sentinel => "Sentinel",
            Card::Fort => "Fort",
            Card::Monk => "Monk",
            Card::Torii => "Torii",
            Card::Knight => "Knight",
            Card::Banner => "Banner",
            Card::RiceFields => "Rice fields",
            Card::Ronin => "Ronin",
            Card::Ninja => "Ninja",
            Card::Mountain => "Mountain",
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Encode an optional card (`None` = empty slot).
#[must_use]
pub fn encode_slot(card: Option<Card>) -> u8 {
    card.map_or(EMPTY_CODE, Card::code)
}
