//! Bracket generation: tournament lookup, seeding and first-round creation.

use crate::logic::pairing::build_first_round;
use crate::logic::seeding::generate_seeds;
use crate::models::{AthleteId, Bracket, EngineError, SchedulingDefaults, TournamentId};
use crate::store::{MatchStore, TournamentStore};
use rand::Rng;
use uuid::Uuid;

/// Generate a fresh bracket for a tournament.
///
/// Every call starts a new bracket id; matches from earlier generations are
/// left untouched and never advanced into. Callers must not run two
/// generations for the same tournament at once.
pub async fn generate_bracket<R: Rng + ?Sized>(
    tournaments: &dyn TournamentStore,
    matches: &dyn MatchStore,
    tournament_id: TournamentId,
    explicit_seeds: Option<&[AthleteId]>,
    rng: &mut R,
) -> Result<Bracket, EngineError> {
    let tournament = tournaments
        .get_tournament(tournament_id)
        .await?
        .ok_or(EngineError::TournamentNotFound(tournament_id))?;
    tournament.validate()?;

    let seeds = generate_seeds(&tournament.registered_participants, explicit_seeds, rng)?;
    let bracket_id = Uuid::new_v4();
    log::info!(
        "Generating {} bracket {} for tournament {} ({} participants)",
        tournament.format,
        bracket_id,
        tournament.id,
        seeds.len()
    );

    let defaults = SchedulingDefaults::from_tournament(&tournament);
    let round = build_first_round(matches, tournament.id, bracket_id, tournament.format, &seeds, &defaults).await?;

    Ok(Bracket {
        id: bracket_id,
        tournament_id: tournament.id,
        rounds: vec![round],
        seeds,
    })
}
