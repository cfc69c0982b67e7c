//! Table tennis tournament engine: library with models, bracket logic and stores.

pub mod logic;
pub mod models;
pub mod store;

pub use logic::{
    advance_winner, apply_match_result, build_first_round, compute_standings, generate_bracket, generate_seeds,
    latest_bracket_id, next_placement, pair_seeds, record_match_update, resolve_winner, resolve_winner_id,
    Advancement, MatchUpdateOutcome, Pairings, Placement, Standing, StatsUpdate,
};
pub use models::{
    AthleteId, AthletePatch, AthleteProfile, Bracket, BracketId, BracketPosition, EngineError, Entrant, ErrorKind,
    GameMatch, MatchId, MatchPatch, MatchStatus, NewMatch, Round, SchedulingDefaults, Seed, SetScores, Side,
    Tournament, TournamentFormat, TournamentId, TournamentStatus,
};
pub use store::{AthleteStore, MatchStore, MemoryStore, TournamentStore};
