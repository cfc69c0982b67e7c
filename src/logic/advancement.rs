//! Knockout progression: move winners (and byes) into their next-round slot.
//!
//! Round `k` has `e_k` entrants, with `e_1` the bracket size and
//! `e_{k+1} = ceil(e_k / 2)`. Slots `0..e_k/2` are matches; when `e_k` is odd the
//! last slot is a bye. Whoever leaves slot `m` of round `k` becomes entrant `m`
//! of round `k + 1`, i.e. slot `m / 2`, player one for even `m` and player two
//! for odd `m`. Landing on a bye slot moves the entrant on again.

use crate::models::{
    AthleteId, BracketPosition, EngineError, Entrant, GameMatch, MatchPatch, NewMatch, SchedulingDefaults,
    Side, Tournament, TournamentFormat, TournamentId,
};
use crate::store::MatchStore;
use serde::Serialize;

/// Where an entrant leaving a slot goes next.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placement {
    Seat { round: u32, slot: usize, side: Side },
    /// No further round: the entrant has won the bracket.
    Champion,
}

/// Result of advancing a winner through a persisted bracket.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advancement {
    /// Seated in an existing or newly created next-round match.
    Seated(GameMatch),
    Champion(AthleteId),
    /// Round-robin, or no winner to advance.
    NotApplicable,
}

/// Entrants in `round` (1-based) of a knockout bracket of `bracket_size`.
pub fn entrants_in_round(bracket_size: usize, round: u32) -> usize {
    (1..round).fold(bracket_size, |e, _| e.div_ceil(2))
}

/// Whether `slot` is the bye of a round with `entrants` entrants.
pub fn is_bye_slot(entrants: usize, slot: usize) -> bool {
    entrants % 2 == 1 && slot == entrants / 2
}

/// Next placement for whoever leaves `slot` of `round`, cascading through byes.
pub fn next_placement(bracket_size: usize, round: u32, slot: usize) -> Placement {
    let (mut round, mut slot) = (round, slot);
    loop {
        let next_entrants = entrants_in_round(bracket_size, round + 1);
        if next_entrants <= 1 {
            return Placement::Champion;
        }
        let next_slot = slot / 2;
        if is_bye_slot(next_entrants, next_slot) {
            round += 1;
            slot = next_slot;
            continue;
        }
        let side = if slot % 2 == 0 { Side::PlayerOne } else { Side::PlayerTwo };
        return Placement::Seat {
            round: round + 1,
            slot: next_slot,
            side,
        };
    }
}

/// Advance the winner of a completed knockout match.
pub async fn advance_winner(
    matches: &dyn MatchStore,
    tournament: &Tournament,
    completed: &GameMatch,
) -> Result<Advancement, EngineError> {
    if tournament.format != TournamentFormat::Knockout {
        return Ok(Advancement::NotApplicable);
    }
    let Some(winner) = completed.winner else {
        return Ok(Advancement::NotApplicable);
    };
    let defaults = SchedulingDefaults::from_tournament(tournament);
    advance_entrant(matches, tournament.id, completed.position, winner, &defaults).await
}

/// Seat `athlete_id`, leaving `from`, in its next-round match.
///
/// Reuses the target match when it already exists in the same bracket (filling
/// its TBD side), otherwise creates it with the opponent TBD.
pub async fn advance_entrant(
    matches: &dyn MatchStore,
    tournament_id: TournamentId,
    from: BracketPosition,
    athlete_id: AthleteId,
    defaults: &SchedulingDefaults,
) -> Result<Advancement, EngineError> {
    let (round, slot, side) = match next_placement(from.bracket_size, from.round, from.slot) {
        Placement::Champion => {
            log::info!("Athlete {} won bracket {}", athlete_id, from.bracket_id);
            return Ok(Advancement::Champion(athlete_id));
        }
        Placement::Seat { round, slot, side } => (round, slot, side),
    };

    let existing = matches
        .list_matches_by_tournament(tournament_id)
        .await?
        .into_iter()
        .find(|m| m.position.bracket_id == from.bracket_id && m.position.round == round && m.position.slot == slot);

    let entrant = Entrant::Athlete(athlete_id);
    let seated = match existing {
        Some(m) if m.entrant(side) == entrant => m,
        Some(m) => {
            if !m.entrant(side).is_tbd() {
                log::warn!(
                    "Replacing {:?} with athlete {} in match {} (round {}, slot {})",
                    m.entrant(side),
                    athlete_id,
                    m.id,
                    round,
                    slot
                );
            }
            let patch = MatchPatch {
                expected_version: Some(m.version),
                ..MatchPatch::seat(side, entrant)
            };
            matches.update_match(m.id, patch).await?
        }
        None => {
            let (player_one, player_two) = match side {
                Side::PlayerOne => (entrant, Entrant::Tbd),
                Side::PlayerTwo => (Entrant::Tbd, entrant),
            };
            let position = BracketPosition {
                round,
                slot,
                ..from
            };
            matches
                .create_match(NewMatch::scheduled(tournament_id, position, player_one, player_two, defaults))
                .await?
        }
    };
    log::info!(
        "Advanced athlete {} to round {} slot {} ({:?})",
        athlete_id,
        round,
        slot,
        side
    );
    Ok(Advancement::Seated(seated))
}
