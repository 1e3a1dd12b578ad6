//! Emissary tokens and the shared spots they occupy.
//!
//! Each player starts with the same number of emissaries in reserve.
//! Swap and Discard place one on a free shared spot; Decree seals one
//! on the decree for the rest of the game. Recall brings a player's
//! swap and discard tokens back to their reserve.
//!
//! For every player, `reserve + placed == initial` at all times.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::NaishiConfig;
use crate::core::player::{PlayerId, PlayerMap};
use crate::error::IllegalReason;

/// The three places an emissary can stand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpotKind {
    Swap,
    Discard,
    Decree,
}

impl std::fmt::Display for SpotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SpotKind::Swap => "swap",
            SpotKind::Discard => "discard",
            SpotKind::Decree => "decree",
        })
    }
}

type Spots = SmallVec<[Option<PlayerId>; 4]>;

/// Reserves and spot occupancy for both players.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmissaryBoard {
    initial: u8,
    reserve: PlayerMap<u8>,
    swap_spots: Spots,
    discard_spots: Spots,
    decree: Option<PlayerId>,
}

impl EmissaryBoard {
    #[must_use]
    pub fn new(config: &NaishiConfig) -> Self {
        Self {
            initial: config.initial_emissaries,
            reserve: PlayerMap::with_value(config.initial_emissaries),
            swap_spots: SmallVec::from_elem(None, config.swap_spots),
            discard_spots: SmallVec::from_elem(None, config.discard_spots),
            decree: None,
        }
    }

    /// Emissaries each player started with.
    #[must_use]
    pub fn initial(&self) -> u8 {
        self.initial
    }

    /// Emissaries `player` still holds.
    #[must_use]
    pub fn reserve(&self, player: PlayerId) -> u8 {
        self.reserve[player]
    }

    /// Occupancy of every spot of one kind.
    #[must_use]
    pub fn spots(&self, kind: SpotKind) -> &[Option<PlayerId>] {
        match kind {
            SpotKind::Swap => &self.swap_spots,
            SpotKind::Discard => &self.discard_spots,
            SpotKind::Decree => std::slice::from_ref(&self.decree),
        }
    }

    #[must_use]
    pub fn has_free(&self, kind: SpotKind) -> bool {
        self.spots(kind).iter().any(Option::is_none)
    }

    /// Who sealed the decree, if anyone has.
    #[must_use]
    pub fn decree_holder(&self) -> Option<PlayerId> {
        self.decree
    }

    #[must_use]
    pub fn decree_used(&self) -> bool {
        self.decree.is_some()
    }

    /// Emissaries `player` has on any spot, decree included.
    #[must_use]
    pub fn placed(&self, player: PlayerId) -> u8 {
        let on_spots = self.recallable(player);
        on_spots + u8::from(self.decree == Some(player))
    }

    /// Emissaries `player` has on swap and discard spots.
    #[must_use]
    pub fn recallable(&self, player: PlayerId) -> u8 {
        let owned = self
            .swap_spots
            .iter()
            .chain(self.discard_spots.iter())
            .filter(|&&spot| spot == Some(player))
            .count();
        u8::try_from(owned).unwrap_or(u8::MAX)
    }

    /// Check that `player` could place an emissary on `kind`.
    pub fn check_place(&self, player: PlayerId, kind: SpotKind) -> Result<(), IllegalReason> {
        if kind == SpotKind::Decree && self.decree_used() {
            return Err(IllegalReason::DecreeUsed);
        }
        if self.reserve[player] == 0 {
            return Err(IllegalReason::NoReservedEmissary);
        }
        if !self.has_free(kind) {
            return Err(IllegalReason::NoFreeSpot(kind));
        }
        Ok(())
    }

    /// Move one emissary from `player`'s reserve onto the first free
    /// spot of `kind`. Returns the spot index.
    pub fn place(&mut self, player: PlayerId, kind: SpotKind) -> Result<usize, IllegalReason> {
        self.check_place(player, kind)?;
        let spots: &mut [Option<PlayerId>] = match kind {
            SpotKind::Swap => &mut self.swap_spots,
            SpotKind::Discard => &mut self.discard_spots,
            SpotKind::Decree => std::slice::from_mut(&mut self.decree),
        };
        let index = spots
            .iter()
            .position(Option::is_none)
            .ok_or(IllegalReason::NoFreeSpot(kind))?;
        spots[index] = Some(player);
        self.reserve[player] -= 1;
        Ok(index)
    }

    /// Return `player`'s swap and discard emissaries to their reserve.
    /// The decree seal stays. Returns how many came back.
    pub fn recall(&mut self, player: PlayerId) -> u8 {
        let mut returned = 0;
        for spot in self.swap_spots.iter_mut().chain(self.discard_spots.iter_mut()) {
            if *spot == Some(player) {
                *spot = None;
                returned += 1;
            }
        }
        self.reserve[player] += returned;
        returned
    }

    #[cfg(test)]
    pub(crate) fn force_reserve(&mut self, player: PlayerId, count: u8) {
        self.reserve[player] = count;
    }

    /// Verify token conservation for both players.
    pub fn check_conservation(&self) -> Result<(), String> {
        for (player, &reserve) in self.reserve.iter() {
            let placed = self.placed(player);
            if u16::from(reserve) + u16::from(placed) != u16::from(self.initial) {
                return Err(format!(
                    "{player} holds {reserve} in reserve and {placed} on spots, expected {} total",
                    self.initial
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> EmissaryBoard {
        EmissaryBoard::new(&NaishiConfig::default())
    }

    #[test]
    fn test_initial_board() {
        let b = board();
        assert_eq!(b.reserve(PlayerId::FIRST), 2);
        assert_eq!(b.spots(SpotKind::Swap).len(), 3);
        assert_eq!(b.spots(SpotKind::Discard).len(), 2);
        assert!(!b.decree_used());
        assert!(b.check_conservation().is_ok());
    }

    #[test]
    fn test_place_and_recall() {
        let mut b = board();
        assert_eq!(b.place(PlayerId::FIRST, SpotKind::Swap), Ok(0));
        assert_eq!(b.place(PlayerId::SECOND, SpotKind::Swap), Ok(1));
        assert_eq!(b.place(PlayerId::FIRST, SpotKind::Discard), Ok(0));

        assert_eq!(b.reserve(PlayerId::FIRST), 0);
        assert_eq!(b.placed(PlayerId::FIRST), 2);
        assert!(b.check_conservation().is_ok());

        assert_eq!(b.recall(PlayerId::FIRST), 2);
        assert_eq!(b.reserve(PlayerId::FIRST), 2);
        assert_eq!(b.spots(SpotKind::Swap), &[None, Some(PlayerId::SECOND), None]);
        assert!(b.check_conservation().is_ok());
    }

    #[test]
    fn test_empty_reserve_rejected() {
        let mut b = board();
        b.place(PlayerId::FIRST, SpotKind::Swap).unwrap();
        b.place(PlayerId::FIRST, SpotKind::Swap).unwrap();
        assert_eq!(
            b.place(PlayerId::FIRST, SpotKind::Discard),
            Err(IllegalReason::NoReservedEmissary)
        );
    }

    #[test]
    fn test_full_spots_rejected() {
        let mut b = EmissaryBoard::new(&NaishiConfig::default().with_spots(1, 1));
        b.place(PlayerId::FIRST, SpotKind::Swap).unwrap();
        assert_eq!(
            b.check_place(PlayerId::SECOND, SpotKind::Swap),
            Err(IllegalReason::NoFreeSpot(SpotKind::Swap))
        );
    }

    #[test]
    fn test_decree_is_permanent() {
        let mut b = board();
        b.place(PlayerId::SECOND, SpotKind::Decree).unwrap();
        assert_eq!(b.decree_holder(), Some(PlayerId::SECOND));
        assert_eq!(b.recallable(PlayerId::SECOND), 0);
        assert_eq!(b.placed(PlayerId::SECOND), 1);

        assert_eq!(b.recall(PlayerId::SECOND), 0);
        assert_eq!(b.reserve(PlayerId::SECOND), 1);
        assert_eq!(
            b.check_place(PlayerId::FIRST, SpotKind::Decree),
            Err(IllegalReason::DecreeUsed)
        );
    }

    #[test]
    fn test_conservation_detects_drift() {
        let mut b = board();
        b.reserve[PlayerId::FIRST] = 5;
        assert!(b.check_conservation().is_err());
    }
}
