//! Win/loss propagation to athlete profiles after a completed match.

use crate::models::{AthleteId, AthleteProfile, EngineError, GameMatch, MatchStatus};
use crate::store::AthleteStore;
use serde::Serialize;

/// Profiles as stored after a result was applied.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct StatsUpdate {
    pub winner: AthleteProfile,
    pub loser: AthleteProfile,
}

#[derive(Clone, Copy, Debug)]
enum Outcome {
    Win,
    Loss,
}

/// Add one win to the match winner and one loss to the other entrant.
///
/// Returns `Ok(None)` without touching any profile when the match is not
/// completed or has no winner. Both sides are updated independently; if
/// either fails, [`EngineError::PartialStatsUpdate`] lists every failing side
/// while the other side's update stays applied.
///
/// Not idempotent: applying the same match twice counts it twice.
pub async fn apply_match_result(
    athletes: &dyn AthleteStore,
    game_match: &GameMatch,
) -> Result<Option<StatsUpdate>, EngineError> {
    let winner = match (game_match.status, game_match.winner) {
        (MatchStatus::Completed, Some(winner)) => winner,
        _ => {
            log::warn!(
                "Match {} has no determined winner (status {:?}); athlete stats unchanged",
                game_match.id,
                game_match.status
            );
            return Ok(None);
        }
    };
    if !game_match.involves(winner) {
        return Err(EngineError::WinnerNotInMatch {
            match_id: game_match.id,
            winner,
        });
    }
    let loser = game_match
        .loser()
        .ok_or(EngineError::UnresolvedEntrant(game_match.id))?;

    let (won, lost) = tokio::join!(
        record(athletes, winner, Outcome::Win),
        record(athletes, loser, Outcome::Loss)
    );

    match (won, lost) {
        (Ok(winner), Ok(loser)) => Ok(Some(StatsUpdate { winner, loser })),
        (won, lost) => {
            let failures: Vec<_> = [(winner, won), (loser, lost)]
                .into_iter()
                .filter_map(|(id, res)| res.err().map(|e| (id, Box::new(e))))
                .collect();
            for (id, err) in &failures {
                log::warn!("Stats update for athlete {} after match {} failed: {}", id, game_match.id, err);
            }
            Err(EngineError::PartialStatsUpdate { failures })
        }
    }
}

async fn record(
    athletes: &dyn AthleteStore,
    athlete_id: AthleteId,
    outcome: Outcome,
) -> Result<AthleteProfile, EngineError> {
    let profile = athletes
        .get_athlete_profile(athlete_id)
        .await?
        .ok_or(EngineError::AthleteNotFound(athlete_id))?;
    let patch = match outcome {
        Outcome::Win => profile.win_patch(),
        Outcome::Loss => profile.loss_patch(),
    };
    athletes.update_athlete_profile(athlete_id, patch).await
}
