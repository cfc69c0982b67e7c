//! Winner determination from per-set scores (best-of-N sets).

use crate::models::{AthleteId, EngineError, GameMatch, SetScores, Side};
use std::cmp::Ordering;

/// Side that won more sets, or `None` when set wins are level (including no sets).
pub fn resolve_winner(scores: &SetScores) -> Result<Option<Side>, EngineError> {
    scores.validate()?;
    let (one, two) = scores.set_wins();
    Ok(match one.cmp(&two) {
        Ordering::Greater => Some(Side::PlayerOne),
        Ordering::Less => Some(Side::PlayerTwo),
        Ordering::Equal => None,
    })
}

/// Resolve `scores` for `game_match` and map the winning side to its athlete.
pub fn resolve_winner_id(game_match: &GameMatch, scores: &SetScores) -> Result<Option<AthleteId>, EngineError> {
    match resolve_winner(scores)? {
        Some(side) => game_match
            .entrant(side)
            .athlete()
            .map(Some)
            .ok_or(EngineError::UnresolvedEntrant(game_match.id)),
        None => Ok(None),
    }
}
