//! The opening draft.
//!
//! Setup deals the river and gives each player a few draft cards. Each
//! player then gives one of them to the opponent: the first player
//! chooses, then the second. Once both choices are in, the chosen cards
//! change hands, Mountains pad each hand to full size, and each hand is
//! shuffled into the bottom row of its territory.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::board::territory::HAND_SIZE;
use crate::board::River;
use crate::core::action::ActionKind;
use crate::core::card::Card;
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::GameState;
use crate::error::{EngineError, IllegalReason};

/// Cards a player holds during the draft.
pub type DraftHand = SmallVec<[Card; HAND_SIZE]>;

/// Draft cards and the choices made so far.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftState {
    hands: PlayerMap<DraftHand>,
    choices: PlayerMap<Option<u8>>,
}

impl DraftState {
    #[must_use]
    pub fn new(first: DraftHand, second: DraftHand) -> Self {
        Self {
            hands: PlayerMap::new(|p| if p == PlayerId::FIRST { first.clone() } else { second.clone() }),
            choices: PlayerMap::with_value(None),
        }
    }

    /// Draft cards dealt to `player`.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &[Card] {
        &self.hands[player]
    }

    /// Index of the card `player` gives away, once chosen.
    #[must_use]
    pub fn choice(&self, player: PlayerId) -> Option<u8> {
        self.choices[player]
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.choices.iter().all(|(_, c)| c.is_some())
    }

    pub(crate) fn record_choice(&mut self, player: PlayerId, give: u8) {
        self.choices[player] = Some(give);
    }
}

impl GameState {
    /// Shuffle the pool, deal the river and the draft hands.
    pub(crate) fn setup_draft(&mut self) {
        let config = self.config;
        let mut pool = Card::pool();
        self.rng.shuffle(&mut pool);

        let river_cards = config.decks * config.cards_per_deck;
        self.river = River::deal(&pool[..river_cards], config.decks, config.cards_per_deck);

        let rest = &pool[river_cards..];
        let first: DraftHand = rest[..config.draft_cards].iter().copied().collect();
        let second: DraftHand = rest[config.draft_cards..2 * config.draft_cards]
            .iter()
            .copied()
            .collect();

        debug!(?first, ?second, "draft hands dealt");
        self.draft = Some(DraftState::new(first, second));
        self.current_player = PlayerId::FIRST;
    }

    /// Exchange the chosen draft cards and build both starting hands.
    ///
    /// Fails with `DraftComplete` outside the draft and with
    /// `DraftIncomplete` while a choice is still missing. On success the
    /// game enters the main loop with the first player to act.
    pub(crate) fn complete_draft(&mut self) -> Result<(), EngineError> {
        let draft = self
            .draft
            .as_ref()
            .ok_or(EngineError::illegal(ActionKind::Draft, IllegalReason::DraftComplete))?;
        let (Some(give_first), Some(give_second)) =
            (draft.choice(PlayerId::FIRST), draft.choice(PlayerId::SECOND))
        else {
            return Err(EngineError::illegal(ActionKind::Draft, IllegalReason::DraftIncomplete));
        };

        let mut hands = draft.hands.clone();
        let (first, second) = hands.both_mut();
        std::mem::swap(&mut first[give_first as usize], &mut second[give_second as usize]);

        for (player, hand) in hands.iter_mut() {
            hand.extend(std::iter::repeat(Card::Mountain).take(self.config.draft_mountains()));
            self.rng.shuffle(hand.as_mut_slice());
            let full: [Card; HAND_SIZE] = hand.as_slice().try_into().map_err(|_| {
                EngineError::InvariantViolation(format!(
                    "{player} drafted hand holds {} cards, expected {HAND_SIZE}",
                    hand.len()
                ))
            })?;
            self.territories[player].set_hand(full);
        }

        self.draft = None;
        self.current_player = PlayerId::FIRST;
        info!("draft complete");
        Ok(())
    }
}
