//! Seeds, rounds and brackets derived from a tournament.

use crate::models::athlete::AthleteId;
use crate::models::game::{BracketId, GameMatch};
use crate::models::tournament::{Tournament, TournamentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One bracket position. `position` is 1-based and contiguous across a seeding.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub position: u32,
    pub athlete_id: AthleteId,
}

/// Time and place given to matches the engine creates.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SchedulingDefaults {
    pub time: DateTime<Utc>,
    pub location: Option<String>,
}

impl SchedulingDefaults {
    pub fn from_tournament(tournament: &Tournament) -> Self {
        Self {
            time: tournament.start_date,
            location: tournament.location.clone(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub round_number: u32,
    pub matches: Vec<GameMatch>,
    /// Knockout only: participant left unpaired in an odd-sized round.
    pub bye: Option<AthleteId>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub id: BracketId,
    pub tournament_id: TournamentId,
    /// Ascending by `round_number`, starting at 1.
    pub rounds: Vec<Round>,
    pub seeds: Vec<Seed>,
}
