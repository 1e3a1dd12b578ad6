//! Property tests for region detection and the emissary economy.

use proptest::prelude::*;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use naishi_engine::board::Grid;
use naishi_engine::core::{GameState, PlayerId};
use naishi_engine::rules::Phase;

proptest! {
    #[test]
    fn regions_partition_occupied_cells(
        (rows, cols, occupied) in (1usize..5, 1usize..7)
            .prop_flat_map(|(r, c)| (Just(r), Just(c), prop::collection::vec(any::<bool>(), r * c)))
    ) {
        let grid = Grid::new(rows, cols);
        let regions = grid.compute_regions(&occupied);

        let mut seen = vec![false; occupied.len()];
        for region in &regions {
            prop_assert_eq!(region.size, region.members.len());
            prop_assert!(region.size > 0);
            for &cell in &region.members {
                prop_assert!(occupied[cell]);
                prop_assert!(!seen[cell], "cell {} in two regions", cell);
                seen[cell] = true;
            }
        }
        prop_assert_eq!(seen, occupied.clone());

        // Regions are maximal: no occupied neighbour lies outside.
        for region in &regions {
            for &cell in &region.members {
                for n in grid.neighbors(cell) {
                    if occupied[n] {
                        prop_assert!(region.members.contains(&n));
                    }
                }
            }
        }
    }

    #[test]
    fn regions_follow_row_major_order(
        occupied in prop::collection::vec(any::<bool>(), 10)
    ) {
        let grid = Grid::new(2, 5);
        let regions = grid.compute_regions(&occupied);
        let firsts: Vec<usize> = regions.iter().map(|r| r.members[0]).collect();
        let mut sorted = firsts.clone();
        sorted.sort_unstable();
        prop_assert_eq!(firsts, sorted);
        for region in &regions {
            prop_assert!(region.members.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn emissary_tokens_are_conserved(seed in any::<u64>(), play in any::<u64>()) {
        let mut state = GameState::with_seed(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(play);
        let initial = state.emissaries().initial();

        while !state.is_over() {
            if state.phase() == Phase::OptionalEmissaryWindow && rng.gen_bool(0.3) {
                state.skip_optional_emissary().unwrap();
            } else {
                let actions = state.legal_actions();
                state.apply_action(*actions.choose(&mut rng).unwrap()).unwrap();
            }

            let board = state.emissaries();
            for player in PlayerId::all() {
                prop_assert_eq!(board.reserve(player) + board.placed(player), initial);
            }
        }
    }

    #[test]
    fn observation_shape_is_stable(seed in any::<u64>(), steps in 0usize..40) {
        use naishi_engine::nn::{NaishiEncoder, StateEncoder, ACTION_MASK_LEN, OBSERVATION_LEN};

        let mut state = GameState::with_seed(seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let encoder = NaishiEncoder::new();
        for _ in 0..steps {
            if state.is_over() {
                break;
            }
            let actions = state.legal_actions();
            state.apply_action(*actions.choose(&mut rng).unwrap()).unwrap();
        }

        for player in PlayerId::all() {
            prop_assert_eq!(encoder.encode(&state, player).len(), OBSERVATION_LEN);
        }
        let mask = encoder.action_mask(&state);
        prop_assert_eq!(mask.len(), ACTION_MASK_LEN);
        let legal = state.legal_action_types();
        for (code, &allowed) in mask[..7].iter().enumerate() {
            prop_assert_eq!(allowed, legal.iter().any(|k| k.code() == code));
        }
    }
}
