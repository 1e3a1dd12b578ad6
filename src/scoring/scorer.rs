//! End-of-game scoring.
//!
//! Positional cards score from their cell and their neighbours on the
//! territory grid; Rice fields score per connected region; Mountains,
//! Torii, Banners and Ronin score from counts over the whole territory.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::territory::{Territory, LINE_SIZE, TERRITORY_GRID};
use crate::core::card::{Card, CARD_KINDS};
use crate::core::player::PlayerId;
use crate::rules::result::GameResult;

/// Points per card kind plus the total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    per_card: [i32; CARD_KINDS],
}

impl ScoreBreakdown {
    /// Points earned by one card kind.
    #[must_use]
    pub fn get(&self, card: Card) -> i32 {
        self.per_card[card.code() as usize]
    }

    /// Sum over every card kind.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.per_card.iter().sum()
    }

    fn add(&mut self, card: Card, points: i32) {
        self.per_card[card.code() as usize] += points;
    }

    /// Non-zero lines in card order, for display.
    pub fn lines(&self) -> impl Iterator<Item = (Card, i32)> + '_ {
        Card::ALL
            .iter()
            .map(|&card| (card, self.get(card)))
            .filter(|&(_, points)| points != 0)
    }
}

/// Points for one connected group of Rice fields.
#[must_use]
pub const fn rice_field_points(region_size: usize) -> i32 {
    match region_size {
        0 | 1 => 0,
        2 => 10,
        3 => 20,
        _ => 30,
    }
}

fn neighbours_holding(territory: &Territory, cell: usize, card: Card) -> i32 {
    TERRITORY_GRID
        .neighbors(cell)
        .into_iter()
        .filter(|&n| territory.get(n) == card)
        .count() as i32
}

/// Score a territory whose Ninjas have already been resolved.
///
/// An unresolved Ninja scores nothing itself but still counts as a
/// distinct card for the Ronin bonus.
#[must_use]
pub fn calculate_score(territory: &Territory) -> ScoreBreakdown {
    let mut score = ScoreBreakdown::default();

    for (cell, &card) in territory.cells().iter().enumerate() {
        let in_hand = cell >= LINE_SIZE;
        match card {
            Card::Naishi => match cell {
                2 => score.add(card, 12),
                7 => score.add(card, 8),
                _ => {}
            },
            Card::Fort => {
                if matches!(cell, 0 | 4 | 5 | 9) {
                    score.add(card, 6);
                }
            }
            Card::Councellor => {
                let base = match cell {
                    1 | 3 | 6 | 8 => 4,
                    2 | 7 => 3,
                    _ => 2,
                };
                score.add(card, base + 4 * neighbours_holding(territory, cell, Card::Naishi));
            }
            Card::Sentinel => {
                if neighbours_holding(territory, cell, Card::Sentinel) == 0 {
                    score.add(card, 3);
                }
                score.add(card, 4 * neighbours_holding(territory, cell, Card::Fort));
            }
            Card::Monk => {
                if in_hand {
                    score.add(card, 5);
                }
                score.add(card, 2 * neighbours_holding(territory, cell, Card::Torii));
            }
            Card::Knight => {
                if in_hand {
                    score.add(card, 3);
                    if territory.get(cell - LINE_SIZE) == Card::Banner {
                        score.add(card, 10);
                    }
                }
            }
            // Count-based kinds are scored below.
            Card::Mountain | Card::Torii | Card::Banner | Card::RiceFields | Card::Ronin | Card::Ninja => {}
        }
    }

    for region in territory.regions_of(Card::RiceFields) {
        score.add(Card::RiceFields, rice_field_points(region.size));
    }

    match territory.count(Card::Mountain) {
        0 => {}
        1 => score.add(Card::Mountain, 5),
        _ => score.add(Card::Mountain, -5),
    }

    match territory.count(Card::Torii) {
        1 => score.add(Card::Torii, -5),
        n if n >= 3 => score.add(Card::Torii, 30),
        _ => {}
    }

    match territory.count(Card::Banner) {
        0 => {}
        1 => score.add(Card::Banner, 3),
        _ => score.add(Card::Banner, 8),
    }

    let ronins = territory.count(Card::Ronin) as i32;
    if ronins > 0 {
        let distinct: FxHashSet<Card> = territory
            .cells()
            .iter()
            .copied()
            .filter(|&c| c != Card::Mountain)
            .collect();
        let per_ronin = match distinct.len() {
            8 => 8,
            9 => 15,
            10 => 45,
            _ => 0,
        };
        score.add(Card::Ronin, ronins * per_ronin);
    }

    score
}

/// Picks which character each Ninja copies.
pub trait NinjaChooser {
    /// Cell whose card the Ninja on `ninja_cell` copies, or `None` to
    /// leave it unresolved. `territory` is the unresolved territory.
    fn choose(&mut self, ninja_cell: usize, territory: &Territory) -> Option<usize>;
}

impl<F> NinjaChooser for F
where
    F: FnMut(usize, &Territory) -> Option<usize>,
{
    fn choose(&mut self, ninja_cell: usize, territory: &Territory) -> Option<usize> {
        self(ninja_cell, territory)
    }
}

/// Leaves every Ninja unresolved.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCopy;

impl NinjaChooser for NoCopy {
    fn choose(&mut self, _ninja_cell: usize, _territory: &Territory) -> Option<usize> {
        None
    }
}

/// Copies, Ninja by Ninja, the character that maximizes the total.
///
/// Ties go to the lowest cell. Deterministic, so it can stand in for a
/// player's choice in automated games.
#[derive(Clone, Copy, Debug, Default)]
pub struct BestCopy;

impl NinjaChooser for BestCopy {
    fn choose(&mut self, ninja_cell: usize, territory: &Territory) -> Option<usize> {
        let mut best: Option<(i32, usize)> = None;
        for (cell, &card) in territory.cells().iter().enumerate() {
            if !card.is_character() {
                continue;
            }
            let mut trial = territory.clone();
            trial.replace(ninja_cell, card);
            let total = calculate_score(&trial).total();
            if best.map_or(true, |(points, _)| total > points) {
                best = Some((total, cell));
            }
        }
        best.map(|(_, cell)| cell)
    }
}

/// Replace each Ninja with the character its chooser picks.
///
/// Choices that do not point at a character are ignored and the Ninja
/// stays unresolved.
#[must_use]
pub fn resolve_ninjas(territory: &Territory, chooser: &mut impl NinjaChooser) -> Territory {
    let mut resolved = territory.clone();
    let has_character = territory.cells().iter().any(|c| c.is_character());
    if !has_character {
        return resolved;
    }

    for (cell, &card) in territory.cells().iter().enumerate() {
        if card != Card::Ninja {
            continue;
        }
        let copied = chooser
            .choose(cell, territory)
            .and_then(|source| territory.cells().get(source).copied())
            .filter(|c| c.is_character());
        if let Some(copy) = copied {
            resolved.replace(cell, copy);
        }
    }

    resolved
}

/// Distinct kinds in a territory, excluding Mountains and Ninjas.
#[must_use]
pub fn distinct_cards(territory: &Territory) -> usize {
    territory
        .cells()
        .iter()
        .copied()
        .filter(|&c| c != Card::Mountain && c != Card::Ninja)
        .collect::<FxHashSet<_>>()
        .len()
}

/// Higher total wins; ties go to the territory with more distinct cards.
#[must_use]
pub fn determine_winner(
    scores: [i32; 2],
    territories: [&Territory; 2],
) -> GameResult {
    let [first, second] = scores;
    if first != second {
        let winner = if first > second { PlayerId::FIRST } else { PlayerId::SECOND };
        return GameResult::Winner(winner);
    }

    let [a, b] = territories.map(distinct_cards);
    match a.cmp(&b) {
        std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::FIRST),
        std::cmp::Ordering::Less => GameResult::Winner(PlayerId::SECOND),
        std::cmp::Ordering::Equal => GameResult::Draw,
    }
}
