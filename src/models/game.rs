//! Match record, per-set scores, entrants and match patches.

use crate::models::athlete::AthleteId;
use crate::models::bracket::SchedulingDefaults;
use crate::models::error::EngineError;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a match, assigned by the match store.
pub type MatchId = Uuid;

/// Identifies one generation of a tournament's bracket.
pub type BracketId = Uuid;

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

/// Occupant of one side of a match. Later knockout rounds start out with a TBD side.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entrant {
    Athlete(AthleteId),
    Tbd,
}

impl Entrant {
    pub fn athlete(&self) -> Option<AthleteId> {
        match self {
            Entrant::Athlete(id) => Some(*id),
            Entrant::Tbd => None,
        }
    }

    pub fn is_tbd(&self) -> bool {
        matches!(self, Entrant::Tbd)
    }
}

impl From<AthleteId> for Entrant {
    fn from(id: AthleteId) -> Self {
        Entrant::Athlete(id)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

/// Points per set; index `i` of both sequences is the same set.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SetScores {
    pub player_one: Vec<u32>,
    pub player_two: Vec<u32>,
}

impl SetScores {
    pub fn new(player_one: Vec<u32>, player_two: Vec<u32>) -> Self {
        Self { player_one, player_two }
    }

    /// Both sides must have an entry for every set played.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.player_one.len() != self.player_two.len() {
            return Err(EngineError::UnequalScoreLengths {
                player_one: self.player_one.len(),
                player_two: self.player_two.len(),
            });
        }
        Ok(())
    }

    /// Sets won by (player one, player two). Drawn sets count for neither.
    pub fn set_wins(&self) -> (u32, u32) {
        self.player_one
            .iter()
            .zip(&self.player_two)
            .fold((0, 0), |(one, two), (a, b)| {
                if a > b {
                    (one + 1, two)
                } else if b > a {
                    (one, two + 1)
                } else {
                    (one, two)
                }
            })
    }

    pub fn is_empty(&self) -> bool {
        self.player_one.is_empty() && self.player_two.is_empty()
    }
}

/// Where a match sits: which bracket generation, how many entrants that bracket
/// was built for, and its round and slot.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct BracketPosition {
    pub bracket_id: BracketId,
    /// Participants seeded into the bracket.
    pub bracket_size: usize,
    /// 1-based round number.
    pub round: u32,
    /// 0-based position within the round; drives knockout advancement.
    pub slot: usize,
}

/// A match before the store has assigned it an id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub tournament_id: TournamentId,
    #[serde(flatten)]
    pub position: BracketPosition,
    pub player_one: Entrant,
    pub player_two: Entrant,
    pub scores: SetScores,
    pub winner: Option<AthleteId>,
    pub scheduled_time: DateTime<Utc>,
    pub status: MatchStatus,
    pub location: Option<String>,
}

impl NewMatch {
    /// A scheduled, unscored match at the default time and place.
    pub fn scheduled(
        tournament_id: TournamentId,
        position: BracketPosition,
        player_one: Entrant,
        player_two: Entrant,
        defaults: &SchedulingDefaults,
    ) -> Self {
        Self {
            tournament_id,
            position,
            player_one,
            player_two,
            scores: SetScores::default(),
            winner: None,
            scheduled_time: defaults.time,
            status: MatchStatus::Scheduled,
            location: defaults.location.clone(),
        }
    }
}

/// A persisted match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    #[serde(flatten)]
    pub position: BracketPosition,
    pub player_one: Entrant,
    pub player_two: Entrant,
    pub scores: SetScores,
    /// Set only once completed with a determinate winner.
    pub winner: Option<AthleteId>,
    pub scheduled_time: DateTime<Utc>,
    pub status: MatchStatus,
    pub location: Option<String>,
    /// Bumped by every successful update.
    pub version: u64,
}

impl GameMatch {
    pub fn from_new(id: MatchId, new: NewMatch) -> Self {
        Self {
            id,
            tournament_id: new.tournament_id,
            position: new.position,
            player_one: new.player_one,
            player_two: new.player_two,
            scores: new.scores,
            winner: new.winner,
            scheduled_time: new.scheduled_time,
            status: new.status,
            location: new.location,
            version: 0,
        }
    }

    pub fn entrant(&self, side: Side) -> Entrant {
        match side {
            Side::PlayerOne => self.player_one,
            Side::PlayerTwo => self.player_two,
        }
    }

    /// Which side `athlete_id` plays on, if any.
    pub fn side_of(&self, athlete_id: AthleteId) -> Option<Side> {
        if self.player_one == Entrant::Athlete(athlete_id) {
            Some(Side::PlayerOne)
        } else if self.player_two == Entrant::Athlete(athlete_id) {
            Some(Side::PlayerTwo)
        } else {
            None
        }
    }

    pub fn involves(&self, athlete_id: AthleteId) -> bool {
        self.side_of(athlete_id).is_some()
    }

    /// The athlete who did not win. `None` without a winner or with a TBD opponent.
    pub fn loser(&self) -> Option<AthleteId> {
        let winner = self.winner?;
        match self.side_of(winner)? {
            Side::PlayerOne => self.player_two.athlete(),
            Side::PlayerTwo => self.player_one.athlete(),
        }
    }

    /// Merge the set fields of `patch` and bump the version.
    pub fn apply(&mut self, patch: &MatchPatch) {
        if let Some(scores) = &patch.scores {
            self.scores = scores.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(winner) = patch.winner {
            self.winner = winner;
        }
        if let Some(time) = patch.scheduled_time {
            self.scheduled_time = time;
        }
        if let Some(location) = &patch.location {
            self.location = location.clone();
        }
        if let Some(entrant) = patch.player_one {
            self.player_one = entrant;
        }
        if let Some(entrant) = patch.player_two {
            self.player_two = entrant;
        }
        self.version += 1;
    }
}

/// Partial update of a match; `None` leaves the field untouched.
///
/// `winner` and `location` are clearable: `Some(None)` (JSON `null`) unsets them.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchPatch {
    #[serde(default)]
    pub scores: Option<SetScores>,
    #[serde(default)]
    pub status: Option<MatchStatus>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub winner: Option<Option<AthleteId>>,
    #[serde(default)]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default)]
    pub player_one: Option<Entrant>,
    #[serde(default)]
    pub player_two: Option<Entrant>,
    /// When set, the update only succeeds against this stored version.
    #[serde(default)]
    pub expected_version: Option<u64>,
}

impl MatchPatch {
    /// Patch that seats `entrant` on `side`.
    pub fn seat(side: Side, entrant: Entrant) -> Self {
        match side {
            Side::PlayerOne => Self {
                player_one: Some(entrant),
                ..Self::default()
            },
            Side::PlayerTwo => Self {
                player_two: Some(entrant),
                ..Self::default()
            },
        }
    }
}

/// A present field becomes `Some`, so `null` reads as `Some(None)` instead of absent.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
