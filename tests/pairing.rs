//! Integration tests for first-round pairing and bracket generation.

mod common;

use common::{bracket_in_order, match_at, start_date, tournament_with_athletes};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use table_tennis_bracket::{
    build_first_round, generate_bracket, pair_seeds, EngineError, Entrant, MatchStatus, MatchStore, MemoryStore,
    SchedulingDefaults, Seed, Tournament, TournamentFormat,
};
use uuid::Uuid;

fn seeds(n: usize) -> Vec<Seed> {
    (0..n)
        .map(|i| Seed {
            position: i as u32 + 1,
            athlete_id: Uuid::new_v4(),
        })
        .collect()
}

#[test]
fn knockout_pairs_consecutive_seeds() {
    let s = seeds(8);
    let p = pair_seeds(TournamentFormat::Knockout, &s);
    assert_eq!(p.pairs.len(), 4);
    for (k, &(one, two)) in p.pairs.iter().enumerate() {
        assert_eq!(one, s[2 * k].athlete_id);
        assert_eq!(two, s[2 * k + 1].athlete_id);
    }
    assert_eq!(p.bye, None);
}

#[test]
fn knockout_odd_field_leaves_last_seed_as_bye() {
    let s = seeds(7);
    let p = pair_seeds(TournamentFormat::Knockout, &s);
    assert_eq!(p.pairs.len(), 3);
    assert_eq!(p.bye, Some(s[6].athlete_id));
    let paired: HashSet<_> = p.pairs.iter().flat_map(|&(a, b)| [a, b]).collect();
    assert_eq!(paired.len(), 6);
    assert!(!paired.contains(&s[6].athlete_id));
}

#[test]
fn pairing_follows_positions_not_input_order() {
    let mut s = seeds(4);
    s.reverse();
    let p = pair_seeds(TournamentFormat::Knockout, &s);
    assert_eq!(p.pairs[0], (s[3].athlete_id, s[2].athlete_id));
    assert_eq!(p.pairs[1], (s[1].athlete_id, s[0].athlete_id));
}

#[test]
fn round_robin_pairs_everyone_once_in_lexicographic_order() {
    let s = seeds(5);
    let p = pair_seeds(TournamentFormat::RoundRobin, &s);
    assert_eq!(p.pairs.len(), 10);
    assert_eq!(p.pairs[0], (s[0].athlete_id, s[1].athlete_id));
    assert_eq!(p.pairs[3], (s[0].athlete_id, s[4].athlete_id));
    assert_eq!(p.pairs[4], (s[1].athlete_id, s[2].athlete_id));
    assert_eq!(p.pairs[9], (s[3].athlete_id, s[4].athlete_id));

    let unordered: HashSet<_> = p
        .pairs
        .iter()
        .map(|&(a, b)| if a < b { (a, b) } else { (b, a) })
        .collect();
    assert_eq!(unordered.len(), 10);
    assert_eq!(p.bye, None);
}

#[tokio::test]
async fn empty_seeding_builds_empty_round() {
    let store = MemoryStore::new();
    let defaults = SchedulingDefaults {
        time: start_date(),
        location: None,
    };
    let tid = Uuid::new_v4();
    let round = build_first_round(&store, tid, Uuid::new_v4(), TournamentFormat::Knockout, &[], &defaults)
        .await
        .unwrap();
    assert_eq!(round.round_number, 1);
    assert!(round.matches.is_empty());
    assert_eq!(round.bye, None);
    assert!(store.list_matches_by_tournament(tid).await.unwrap().is_empty());
}

#[tokio::test]
async fn knockout_bracket_persists_scheduled_first_round() {
    let (store, t, ids) = tournament_with_athletes(TournamentFormat::Knockout, 8);
    let bracket = bracket_in_order(&store, &t).await;

    assert_eq!(bracket.tournament_id, t.id);
    assert_eq!(bracket.rounds.len(), 1);
    let round = &bracket.rounds[0];
    assert_eq!(round.matches.len(), 4);
    for (k, m) in round.matches.iter().enumerate() {
        assert_eq!(m.player_one, Entrant::Athlete(ids[2 * k]));
        assert_eq!(m.player_two, Entrant::Athlete(ids[2 * k + 1]));
        assert_eq!(m.status, MatchStatus::Scheduled);
        assert_eq!(m.scheduled_time, t.start_date);
        assert_eq!(m.location.as_deref(), Some("Hall A"));
        assert!(m.scores.is_empty());
        assert_eq!(m.position.bracket_id, bracket.id);
        assert_eq!(m.position.slot, k);
    }
    assert_eq!(store.list_matches_by_tournament(t.id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn knockout_bye_advances_into_round_two() {
    let (store, t, ids) = tournament_with_athletes(TournamentFormat::Knockout, 3);
    let bracket = bracket_in_order(&store, &t).await;
    assert_eq!(bracket.rounds[0].matches.len(), 1);
    assert_eq!(bracket.rounds[0].bye, Some(ids[2]));

    let final_match = match_at(&store, &t, 2, 0).await.unwrap();
    assert_eq!(final_match.player_one, Entrant::Tbd);
    assert_eq!(final_match.player_two, Entrant::Athlete(ids[2]));
}

#[tokio::test]
async fn knockout_bye_cascades_through_odd_rounds() {
    // 5 entrants: round 2 has 3 entrants, so the round-1 bye also byes round 2.
    let (store, t, ids) = tournament_with_athletes(TournamentFormat::Knockout, 5);
    bracket_in_order(&store, &t).await;

    assert!(match_at(&store, &t, 2, 1).await.is_none());
    let final_match = match_at(&store, &t, 3, 0).await.unwrap();
    assert_eq!(final_match.player_two, Entrant::Athlete(ids[4]));
    assert_eq!(final_match.player_one, Entrant::Tbd);
}

#[tokio::test]
async fn round_robin_bracket_has_every_pair() {
    let (store, t, _) = tournament_with_athletes(TournamentFormat::RoundRobin, 6);
    let mut rng = StdRng::seed_from_u64(3);
    let bracket = generate_bracket(&store, &store, t.id, None, &mut rng).await.unwrap();
    let round = &bracket.rounds[0];
    assert_eq!(round.matches.len(), 15);
    assert!(round.matches.iter().all(|m| m.position.round == 1));
    assert_eq!(bracket.seeds.len(), 6);
}

#[tokio::test]
async fn regeneration_starts_a_new_bracket() {
    let (store, t, _) = tournament_with_athletes(TournamentFormat::Knockout, 4);
    let first = bracket_in_order(&store, &t).await;
    let second = bracket_in_order(&store, &t).await;
    assert_ne!(first.id, second.id);
    assert_eq!(store.list_matches_by_tournament(t.id).await.unwrap().len(), 4);
}

#[tokio::test]
async fn generate_bracket_requires_known_tournament() {
    let store = MemoryStore::new();
    let missing = Uuid::new_v4();
    let mut rng = StdRng::seed_from_u64(1);
    let err = generate_bracket(&store, &store, missing, None, &mut rng).await.unwrap_err();
    assert_eq!(err, EngineError::TournamentNotFound(missing));
}

#[tokio::test]
async fn generate_bracket_rejects_over_capacity_tournament() {
    let store = MemoryStore::new();
    let participants: Vec<_> = (0..3).map(|_| Uuid::new_v4()).collect();
    let t = Tournament::new("Club night", TournamentFormat::Knockout, start_date(), 2).with_participants(participants);
    store.put_tournament(t.clone()).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let err = generate_bracket(&store, &store, t.id, None, &mut rng).await.unwrap_err();
    assert_eq!(err, EngineError::TooManyParticipants { max: 2, registered: 3 });
}

#[test]
fn unknown_format_is_rejected() {
    assert_eq!(
        "swiss".parse::<TournamentFormat>(),
        Err(EngineError::UnsupportedFormat("swiss".to_string()))
    );
    assert_eq!("round-robin".parse::<TournamentFormat>(), Ok(TournamentFormat::RoundRobin));
    assert!(serde_json::from_str::<TournamentFormat>("\"swiss\"").is_err());
    assert_eq!(
        serde_json::from_str::<TournamentFormat>("\"knockout\"").unwrap(),
        TournamentFormat::Knockout
    );
}
