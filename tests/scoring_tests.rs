//! Scoring scenarios through the public API.

use naishi_engine::core::Card::{self, *};
use naishi_engine::scoring::{calculate_score, determine_winner, resolve_ninjas, BestCopy, NoCopy};
use naishi_engine::{GameResult, PlayerId, Territory};

fn territory(line: [Card; 5], hand: [Card; 5]) -> Territory {
    Territory::new(line, hand)
}

#[test]
fn test_rice_fields_split_by_grid() {
    // Cells 0, 5, 6 touch; cell 4 sits alone at the far end of the line.
    let t = territory(
        [RiceFields, Fort, Monk, Torii, RiceFields],
        [RiceFields, RiceFields, Banner, Knight, Sentinel],
    );
    let regions = t.regions_of(RiceFields);
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].members, vec![0, 5, 6]);
    assert_eq!(regions[1].members, vec![4]);
    assert_eq!(calculate_score(&t).get(RiceFields), 20);
}

#[test]
fn test_rice_fields_cap() {
    let t = territory(
        [RiceFields, RiceFields, RiceFields, RiceFields, RiceFields],
        [Mountain; 5],
    );
    assert_eq!(calculate_score(&t).get(RiceFields), 30);
}

#[test]
fn test_ninja_copy_improves_score() {
    let t = territory(
        [Mountain, Mountain, Ninja, Mountain, Mountain],
        [Mountain, Mountain, Naishi, Mountain, Mountain],
    );
    let unresolved = calculate_score(&resolve_ninjas(&t, &mut NoCopy)).total();
    let best = resolve_ninjas(&t, &mut BestCopy);

    assert_eq!(best.get(2), Naishi);
    assert!(calculate_score(&best).total() > unresolved);
}

#[test]
fn test_closure_chooser() {
    let t = territory([Ninja, Monk, Mountain, Mountain, Mountain], [Mountain; 5]);
    let mut copy_cell_one = |_ninja: usize, _t: &Territory| Some(1);
    let resolved = resolve_ninjas(&t, &mut copy_cell_one);
    assert_eq!(resolved.get(0), Monk);
}

#[test]
fn test_tiebreak_on_distinct_cards() {
    let varied = territory([Fort, Monk, Torii, Mountain, Mountain], [Mountain; 5]);
    let plain = territory([Fort, Fort, Fort, Mountain, Mountain], [Mountain; 5]);
    assert_eq!(
        determine_winner([10, 10], [&plain, &varied]),
        GameResult::Winner(PlayerId::SECOND)
    );
}
