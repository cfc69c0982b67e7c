//! Bracket engine: seeding, pairing, winner resolution, stats and progression.

mod advancement;
mod bracket;
mod pairing;
mod resolve;
mod scoring;
mod seeding;
mod standings;
mod stats;

pub use advancement::{
    advance_entrant, advance_winner, entrants_in_round, is_bye_slot, next_placement, Advancement, Placement,
};
pub use bracket::generate_bracket;
pub use pairing::{build_first_round, pair_seeds, Pairings};
pub use resolve::{resolve_winner, resolve_winner_id};
pub use scoring::{record_match_update, MatchUpdateOutcome};
pub use seeding::generate_seeds;
pub use standings::{compute_standings, latest_bracket_id, Standing};
pub use stats::{apply_match_result, StatsUpdate};
