//! Engine errors and their categories.

use crate::models::athlete::AthleteId;
use crate::models::game::MatchId;
use crate::models::tournament::TournamentId;
use serde::Serialize;

/// Category of an [`EngineError`], used by callers to pick a response.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input to an engine operation. Never retried.
    Validation,
    NotFound,
    /// Stale write or an operation already running for the same tournament.
    Conflict,
    /// A collaborator failed. Retrying belongs to the caller.
    TransientIo,
}

/// Errors that can occur during bracket and match operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EngineError {
    /// Explicit seeds are not a permutation of the registered participants.
    SeedMismatch {
        missing: Vec<AthleteId>,
        extra: Vec<AthleteId>,
    },
    /// The same athlete appears twice in a participant or seed list.
    DuplicateParticipant(AthleteId),
    /// Per-set score sequences of different length.
    UnequalScoreLengths { player_one: usize, player_two: usize },
    /// Tournament format string not recognized.
    UnsupportedFormat(String),
    TooManyParticipants { max: usize, registered: usize },
    /// A match still has a TBD side where a real athlete is required.
    UnresolvedEntrant(MatchId),
    /// An explicit winner that is neither entrant of the match.
    WinnerNotInMatch { match_id: MatchId, winner: AthleteId },
    /// A winner given for a match that the update leaves uncompleted.
    WinnerWithoutCompletion(MatchId),
    TournamentNotFound(TournamentId),
    MatchNotFound(MatchId),
    AthleteNotFound(AthleteId),
    /// Optimistic concurrency check failed on a match update.
    VersionConflict {
        match_id: MatchId,
        expected: u64,
        actual: u64,
    },
    /// Bracket generation already running for this tournament.
    GenerationInProgress(TournamentId),
    /// Backend failure reported by a store.
    Store(String),
    /// One or both athlete updates failed after a match result.
    PartialStatsUpdate {
        failures: Vec<(AthleteId, Box<EngineError>)>,
    },
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        use EngineError::*;
        match self {
            SeedMismatch { .. }
            | DuplicateParticipant(_)
            | UnequalScoreLengths { .. }
            | UnsupportedFormat(_)
            | TooManyParticipants { .. }
            | UnresolvedEntrant(_)
            | WinnerNotInMatch { .. }
            | WinnerWithoutCompletion(_) => ErrorKind::Validation,
            TournamentNotFound(_) | MatchNotFound(_) | AthleteNotFound(_) => ErrorKind::NotFound,
            VersionConflict { .. } | GenerationInProgress(_) => ErrorKind::Conflict,
            Store(_) | PartialStatsUpdate { .. } => ErrorKind::TransientIo,
        }
    }
}

fn join_ids(ids: &[AthleteId]) -> String {
    ids.iter().map(|id| id.to_string()).collect::<Vec<_>>().join(", ")
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::SeedMismatch { missing, extra } => write!(
                f,
                "Seeds are not a permutation of the participants (missing: [{}], extra: [{}])",
                join_ids(missing),
                join_ids(extra)
            ),
            EngineError::DuplicateParticipant(id) => write!(f, "Athlete {} is listed more than once", id),
            EngineError::UnequalScoreLengths { player_one, player_two } => write!(
                f,
                "Score sequences differ in length ({} vs {})",
                player_one, player_two
            ),
            EngineError::UnsupportedFormat(name) => write!(f, "Unsupported tournament format: {}", name),
            EngineError::TooManyParticipants { max, registered } => write!(
                f,
                "Tournament allows {} participants ({} registered)",
                max, registered
            ),
            EngineError::UnresolvedEntrant(id) => write!(f, "Match {} still has an undetermined entrant", id),
            EngineError::WinnerNotInMatch { match_id, winner } => {
                write!(f, "Athlete {} does not play in match {}", winner, match_id)
            }
            EngineError::WinnerWithoutCompletion(id) => {
                write!(f, "Match {} can only have a winner once completed", id)
            }
            EngineError::TournamentNotFound(id) => write!(f, "Tournament {} not found", id),
            EngineError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            EngineError::AthleteNotFound(id) => write!(f, "Athlete profile {} not found", id),
            EngineError::VersionConflict { match_id, expected, actual } => write!(
                f,
                "Match {} was modified concurrently (expected version {}, found {})",
                match_id, expected, actual
            ),
            EngineError::GenerationInProgress(id) => {
                write!(f, "Bracket generation already running for tournament {}", id)
            }
            EngineError::Store(msg) => write!(f, "Store error: {}", msg),
            EngineError::PartialStatsUpdate { failures } => {
                write!(f, "Stats update failed for {} athlete(s):", failures.len())?;
                for (id, err) in failures {
                    write!(f, " [{}: {}]", id, err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for EngineError {}
