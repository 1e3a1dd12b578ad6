//! Territory scoring.
//!
//! Scoring is read-only over a territory. The Rice fields line is the
//! one place the region scan from `board::grid` feeds a score: each
//! connected group is worth points by size.

pub mod scorer;

pub use scorer::{
    calculate_score, determine_winner, distinct_cards, resolve_ninjas, rice_field_points,
    BestCopy, NinjaChooser, NoCopy, ScoreBreakdown,
};
