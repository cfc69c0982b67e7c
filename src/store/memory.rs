//! In-memory store: tournaments, matches and athlete profiles behind `RwLock`s.

use crate::models::{
    AthleteId, AthletePatch, AthleteProfile, EngineError, GameMatch, MatchId, MatchPatch, NewMatch,
    Tournament, TournamentId,
};
use crate::store::{AthleteStore, MatchStore, TournamentStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct MemoryStore {
    tournaments: RwLock<HashMap<TournamentId, Tournament>>,
    /// Creation order.
    matches: RwLock<Vec<GameMatch>>,
    athletes: RwLock<HashMap<AthleteId, AthleteProfile>>,
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, EngineError> {
    lock.read().map_err(|_| EngineError::Store("lock error".to_string()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, EngineError> {
    lock.write().map_err(|_| EngineError::Store("lock error".to_string()))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tournament.
    pub fn put_tournament(&self, tournament: Tournament) -> Result<(), EngineError> {
        write(&self.tournaments)?.insert(tournament.id, tournament);
        Ok(())
    }

    /// Register an athlete for a tournament and return the updated tournament.
    pub fn register_participant(
        &self,
        tournament_id: TournamentId,
        athlete_id: AthleteId,
    ) -> Result<Tournament, EngineError> {
        if !read(&self.athletes)?.contains_key(&athlete_id) {
            return Err(EngineError::AthleteNotFound(athlete_id));
        }
        let mut tournaments = write(&self.tournaments)?;
        let t = tournaments
            .get_mut(&tournament_id)
            .ok_or(EngineError::TournamentNotFound(tournament_id))?;
        t.register(athlete_id)?;
        Ok(t.clone())
    }

    /// Insert or replace an athlete profile.
    pub fn put_athlete(&self, profile: AthleteProfile) -> Result<(), EngineError> {
        write(&self.athletes)?.insert(profile.user_id, profile);
        Ok(())
    }
}

#[async_trait]
impl TournamentStore for MemoryStore {
    async fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, EngineError> {
        Ok(read(&self.tournaments)?.get(&id).cloned())
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn create_match(&self, data: NewMatch) -> Result<GameMatch, EngineError> {
        let m = GameMatch::from_new(Uuid::new_v4(), data);
        write(&self.matches)?.push(m.clone());
        Ok(m)
    }

    async fn get_match(&self, id: MatchId) -> Result<Option<GameMatch>, EngineError> {
        Ok(read(&self.matches)?.iter().find(|m| m.id == id).cloned())
    }

    async fn update_match(&self, id: MatchId, patch: MatchPatch) -> Result<GameMatch, EngineError> {
        let mut matches = write(&self.matches)?;
        let m = matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(EngineError::MatchNotFound(id))?;
        if let Some(expected) = patch.expected_version {
            if expected != m.version {
                return Err(EngineError::VersionConflict {
                    match_id: id,
                    expected,
                    actual: m.version,
                });
            }
        }
        m.apply(&patch);
        Ok(m.clone())
    }

    async fn list_matches_by_tournament(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, EngineError> {
        Ok(read(&self.matches)?
            .iter()
            .filter(|m| m.tournament_id == tournament_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AthleteStore for MemoryStore {
    async fn get_athlete_profile(&self, user_id: AthleteId) -> Result<Option<AthleteProfile>, EngineError> {
        Ok(read(&self.athletes)?.get(&user_id).cloned())
    }

    async fn update_athlete_profile(
        &self,
        user_id: AthleteId,
        patch: AthletePatch,
    ) -> Result<AthleteProfile, EngineError> {
        let mut athletes = write(&self.athletes)?;
        let profile = athletes
            .get_mut(&user_id)
            .ok_or(EngineError::AthleteNotFound(user_id))?;
        profile.apply(&patch);
        Ok(profile.clone())
    }
}
