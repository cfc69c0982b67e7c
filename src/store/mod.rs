//! Persistence collaborators of the engine.
//!
//! Any backend (relational, document, tree store) can sit behind these traits;
//! [`MemoryStore`] is the in-process adapter used by the web binary and the tests.

mod memory;

pub use memory::MemoryStore;

use crate::models::{
    AthleteId, AthletePatch, AthleteProfile, EngineError, GameMatch, MatchId, MatchPatch, NewMatch,
    Tournament, TournamentId,
};
use async_trait::async_trait;

/// Read-only tournament access.
#[async_trait]
pub trait TournamentStore: Send + Sync {
    async fn get_tournament(&self, id: TournamentId) -> Result<Option<Tournament>, EngineError>;
}

#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Assign an id, persist and return the full record.
    async fn create_match(&self, data: NewMatch) -> Result<GameMatch, EngineError>;

    async fn get_match(&self, id: MatchId) -> Result<Option<GameMatch>, EngineError>;

    /// Merge `patch` into the stored match. Fails with
    /// [`EngineError::VersionConflict`] when `patch.expected_version` is stale.
    async fn update_match(&self, id: MatchId, patch: MatchPatch) -> Result<GameMatch, EngineError>;

    /// All matches of a tournament, across every bracket generation, in creation order.
    async fn list_matches_by_tournament(&self, tournament_id: TournamentId) -> Result<Vec<GameMatch>, EngineError>;
}

#[async_trait]
pub trait AthleteStore: Send + Sync {
    async fn get_athlete_profile(&self, user_id: AthleteId) -> Result<Option<AthleteProfile>, EngineError>;

    async fn update_athlete_profile(
        &self,
        user_id: AthleteId,
        patch: AthletePatch,
    ) -> Result<AthleteProfile, EngineError>;
}
