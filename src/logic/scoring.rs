//! Match updates: score entry, winner resolution on completion, and the
//! follow-up stats and bracket progression.

use crate::logic::advancement::{advance_winner, Advancement};
use crate::logic::resolve::resolve_winner_id;
use crate::logic::stats::{apply_match_result, StatsUpdate};
use crate::models::{EngineError, GameMatch, MatchId, MatchPatch, MatchStatus};
use crate::store::{AthleteStore, MatchStore, TournamentStore};
use serde::Serialize;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct MatchUpdateOutcome {
    pub updated_match: GameMatch,
    /// Set only when this update completed the match with a winner.
    pub stats_applied: Option<StatsUpdate>,
    pub advancement: Advancement,
}

impl MatchUpdateOutcome {
    fn without_follow_up(updated_match: GameMatch) -> Self {
        Self {
            updated_match,
            stats_applied: None,
            advancement: Advancement::NotApplicable,
        }
    }
}

/// Apply `patch` to a match.
///
/// Everything is checked against the merged match before it is written:
/// scores must line up, a completed match needs both entrants, and a winner
/// exists only on a completed match. Completing a match without an explicit
/// winner resolves one from the scores, and re-scoring a completed match
/// resolves it again. Stats and knockout advancement run only on the
/// transition into `Completed`, so re-saving a completed match never counts
/// its result twice.
pub async fn record_match_update(
    tournaments: &dyn TournamentStore,
    matches: &dyn MatchStore,
    athletes: &dyn AthleteStore,
    match_id: MatchId,
    mut patch: MatchPatch,
) -> Result<MatchUpdateOutcome, EngineError> {
    let current = matches
        .get_match(match_id)
        .await?
        .ok_or(EngineError::MatchNotFound(match_id))?;

    let mut preview = current.clone();
    preview.apply(&patch);
    preview.scores.validate()?;

    let was_completed = current.status == MatchStatus::Completed;
    if preview.status == MatchStatus::Completed {
        if preview.player_one.is_tbd() || preview.player_two.is_tbd() {
            return Err(EngineError::UnresolvedEntrant(match_id));
        }
        match patch.winner {
            Some(Some(winner)) => {
                if !preview.involves(winner) {
                    return Err(EngineError::WinnerNotInMatch { match_id, winner });
                }
            }
            // `null` asks for the winner to be resolved again.
            Some(None) => patch.winner = Some(resolve_winner_id(&preview, &preview.scores)?),
            None if !was_completed || patch.scores.is_some() => {
                patch.winner = Some(resolve_winner_id(&preview, &preview.scores)?);
            }
            None => {}
        }
    } else {
        if let Some(Some(_)) = patch.winner {
            return Err(EngineError::WinnerWithoutCompletion(match_id));
        }
        if preview.winner.is_some() {
            patch.winner = Some(None);
        }
    }

    let completing = !was_completed && preview.status == MatchStatus::Completed;
    let tournament = if completing {
        let tournament = tournaments
            .get_tournament(current.tournament_id)
            .await?
            .ok_or(EngineError::TournamentNotFound(current.tournament_id))?;
        Some(tournament)
    } else {
        None
    };

    let updated = matches.update_match(match_id, patch).await?;
    let Some(tournament) = tournament else {
        if was_completed && updated.winner != current.winner {
            log::warn!(
                "Match {} winner changed from {:?} to {:?} after completion; recorded stats are kept",
                updated.id,
                current.winner,
                updated.winner
            );
        }
        return Ok(MatchUpdateOutcome::without_follow_up(updated));
    };

    if updated.winner.is_none() {
        log::warn!(
            "Match {} completed without a winner ({:?}); no stats or advancement",
            updated.id,
            updated.scores.set_wins()
        );
        return Ok(MatchUpdateOutcome::without_follow_up(updated));
    }

    // A stats failure must not keep the winner out of the next round.
    let stats = apply_match_result(athletes, &updated).await;
    let advancement = advance_winner(matches, &tournament, &updated).await?;
    let stats_applied = stats?;

    Ok(MatchUpdateOutcome {
        updated_match: updated,
        stats_applied,
        advancement,
    })
}
