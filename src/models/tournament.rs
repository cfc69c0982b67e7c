//! Tournament, TournamentFormat and TournamentStatus.

use crate::models::athlete::AthleteId;
use crate::models::error::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// How first-round pairings are built.
///
/// Parsed through [`FromStr`] so that an unknown format coming from a backend
/// surfaces as [`EngineError::UnsupportedFormat`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TournamentFormat {
    Knockout,
    RoundRobin,
}

impl TournamentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentFormat::Knockout => "knockout",
            TournamentFormat::RoundRobin => "round-robin",
        }
    }
}

impl fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TournamentFormat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knockout" => Ok(TournamentFormat::Knockout),
            "round-robin" | "round_robin" => Ok(TournamentFormat::RoundRobin),
            _ => Err(EngineError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for TournamentFormat {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TournamentFormat> for String {
    fn from(format: TournamentFormat) -> Self {
        format.as_str().to_string()
    }
}

/// Lifecycle of a tournament. Read by the engine, never changed by it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Upcoming,
    Ongoing,
    Completed,
}

/// A tournament as supplied by the tournament store.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: TournamentFormat,
    /// Registration order, not seed order.
    pub registered_participants: Vec<AthleteId>,
    pub start_date: DateTime<Utc>,
    pub location: Option<String>,
    pub max_participants: usize,
    pub status: TournamentStatus,
}

impl Tournament {
    /// Create an upcoming tournament with no participants.
    pub fn new(
        name: impl Into<String>,
        format: TournamentFormat,
        start_date: DateTime<Utc>,
        max_participants: usize,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            registered_participants: Vec::new(),
            start_date,
            location: None,
            max_participants,
            status: TournamentStatus::Upcoming,
        }
    }

    /// Builder-style helper for tests and fixtures.
    pub fn with_participants(mut self, participants: Vec<AthleteId>) -> Self {
        self.registered_participants = participants;
        self
    }

    /// Register an athlete at the end of the registration list.
    pub fn register(&mut self, athlete_id: AthleteId) -> Result<(), EngineError> {
        if self.registered_participants.contains(&athlete_id) {
            return Err(EngineError::DuplicateParticipant(athlete_id));
        }
        if self.registered_participants.len() >= self.max_participants {
            return Err(EngineError::TooManyParticipants {
                max: self.max_participants,
                registered: self.registered_participants.len() + 1,
            });
        }
        self.registered_participants.push(athlete_id);
        Ok(())
    }

    /// Check participant uniqueness and the participant cap.
    pub fn validate(&self) -> Result<(), EngineError> {
        let mut seen = HashSet::with_capacity(self.registered_participants.len());
        for &id in &self.registered_participants {
            if !seen.insert(id) {
                return Err(EngineError::DuplicateParticipant(id));
            }
        }
        if self.registered_participants.len() > self.max_participants {
            return Err(EngineError::TooManyParticipants {
                max: self.max_participants,
                registered: self.registered_participants.len(),
            });
        }
        Ok(())
    }
}
