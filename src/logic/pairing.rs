//! First-round pairing for knockout and round-robin brackets.

use crate::logic::advancement::advance_entrant;
use crate::models::{
    AthleteId, BracketId, BracketPosition, EngineError, Entrant, NewMatch, Round, SchedulingDefaults, Seed,
    TournamentFormat, TournamentId,
};
use crate::store::MatchStore;

/// Pairs produced from a seeding, before any match is persisted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Pairings {
    /// (player one, player two), in slot order.
    pub pairs: Vec<(AthleteId, AthleteId)>,
    /// Knockout only: last seed of an odd-sized field.
    pub bye: Option<AthleteId>,
}

/// Pair seeds in position order.
///
/// Knockout: `(1, 2), (3, 4), ...`, an odd last seed is the bye.
/// Round-robin: every `(i, j)` with `i < j`, lexicographic.
pub fn pair_seeds(format: TournamentFormat, seeds: &[Seed]) -> Pairings {
    let mut ordered = seeds.to_vec();
    ordered.sort_by_key(|s| s.position);
    let ids: Vec<AthleteId> = ordered.iter().map(|s| s.athlete_id).collect();

    match format {
        TournamentFormat::Knockout => Pairings {
            pairs: ids.chunks_exact(2).map(|c| (c[0], c[1])).collect(),
            bye: ids.chunks_exact(2).remainder().first().copied(),
        },
        TournamentFormat::RoundRobin => {
            let mut pairs = Vec::with_capacity(ids.len() * ids.len().saturating_sub(1) / 2);
            for (i, &a) in ids.iter().enumerate() {
                for &b in &ids[i + 1..] {
                    pairs.push((a, b));
                }
            }
            Pairings { pairs, bye: None }
        }
    }
}

/// Build and persist round 1 of a bracket.
///
/// One scheduled match is created per pairing. A knockout bye is advanced
/// straight into its round-2 slot. An empty seeding yields an empty round.
/// Creation is not transactional: a store failure part way leaves the matches
/// created so far in place.
pub async fn build_first_round(
    matches: &dyn MatchStore,
    tournament_id: TournamentId,
    bracket_id: BracketId,
    format: TournamentFormat,
    seeds: &[Seed],
    defaults: &SchedulingDefaults,
) -> Result<Round, EngineError> {
    let pairings = pair_seeds(format, seeds);
    let position = |slot| BracketPosition {
        bracket_id,
        bracket_size: seeds.len(),
        round: 1,
        slot,
    };

    let mut created = Vec::with_capacity(pairings.pairs.len());
    for (slot, &(one, two)) in pairings.pairs.iter().enumerate() {
        let m = matches
            .create_match(NewMatch::scheduled(
                tournament_id,
                position(slot),
                Entrant::Athlete(one),
                Entrant::Athlete(two),
                defaults,
            ))
            .await?;
        log::debug!("Created round 1 match {} ({} vs {})", m.id, one, two);
        created.push(m);
    }

    if let Some(bye) = pairings.bye {
        log::info!("Athlete {} has a first-round bye", bye);
        advance_entrant(matches, tournament_id, position(created.len()), bye, defaults).await?;
    }

    Ok(Round {
        round_number: 1,
        matches: created,
        bye: pairings.bye,
    })
}
