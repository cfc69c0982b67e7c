//! Data records for the bracket engine: tournaments, matches, athletes, brackets.

mod athlete;
mod bracket;
mod error;
mod game;
mod tournament;

pub use athlete::{AthleteId, AthletePatch, AthleteProfile};
pub use bracket::{Bracket, Round, SchedulingDefaults, Seed};
pub use error::{EngineError, ErrorKind};
pub use game::{BracketId, BracketPosition, Entrant, GameMatch, MatchId, MatchPatch, MatchStatus, NewMatch, SetScores, Side};
pub use tournament::{Tournament, TournamentFormat, TournamentId, TournamentStatus};
