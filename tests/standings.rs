//! Integration tests for standings.

mod common;

use common::{bracket_in_order, complete, tournament_with_athletes};
use table_tennis_bracket::{compute_standings, latest_bracket_id, MatchStore, TournamentFormat};

#[tokio::test]
async fn round_robin_ranks_by_wins_then_set_difference() {
    let (store, t, ids) = tournament_with_athletes(TournamentFormat::RoundRobin, 3);
    let bracket = bracket_in_order(&store, &t).await;
    let m = &bracket.rounds[0].matches;
    // Pairs: (0,1), (0,2), (1,2). Everyone wins once; athlete 2 wins biggest.
    complete(&store, m[0].id, vec![11, 11, 9, 11], vec![9, 9, 11, 9]).await;
    complete(&store, m[1].id, vec![1, 2, 3], vec![11, 11, 11]).await;
    complete(&store, m[2].id, vec![11, 11, 11], vec![8, 8, 8]).await;

    let matches = store.list_matches_by_tournament(t.id).await.unwrap();
    let table = compute_standings(&t.registered_participants, &matches);

    let order: Vec<_> = table.iter().map(|s| s.athlete_id).collect();
    // athlete 0: won 3-1, lost 0-3 -> sets 3/4, diff -1
    // athlete 1: lost 1-3, won 3-0 -> sets 4/3, diff +1
    // athlete 2: won 3-0, lost 0-3 -> sets 3/3, diff 0
    assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
    assert!(table.iter().all(|s| s.wins == 1 && s.losses == 1));
    assert_eq!(table[0].sets_won, 4);
    assert_eq!(table[0].sets_lost, 3);
    assert!((table[0].win_percentage() - 50.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn knockout_ranks_furthest_round_first() {
    let (store, t, ids) = tournament_with_athletes(TournamentFormat::Knockout, 4);
    let bracket = bracket_in_order(&store, &t).await;
    let semis = &bracket.rounds[0].matches;
    complete(&store, semis[0].id, vec![11, 11, 11], vec![1, 1, 1]).await;
    complete(&store, semis[1].id, vec![2, 2, 2], vec![11, 11, 11]).await;

    let matches = store.list_matches_by_tournament(t.id).await.unwrap();
    let table = compute_standings(&t.registered_participants, &matches);

    assert_eq!(table[0].athlete_id, ids[0]);
    assert_eq!(table[0].furthest_round, 2);
    assert_eq!(table[1].athlete_id, ids[3]);
    assert_eq!(table[1].furthest_round, 2);
    assert_eq!(table[2].athlete_id, ids[1]);
    assert_eq!(table[3].athlete_id, ids[2]);
    assert_eq!(table[3].furthest_round, 1);
}

#[tokio::test]
async fn latest_bracket_is_the_newest_generation() {
    let (store, t, _) = tournament_with_athletes(TournamentFormat::Knockout, 2);
    bracket_in_order(&store, &t).await;
    let second = bracket_in_order(&store, &t).await;

    let matches = store.list_matches_by_tournament(t.id).await.unwrap();
    assert_eq!(latest_bracket_id(&matches), Some(second.id));
    assert_eq!(latest_bracket_id(&[]), None);
}

#[test]
fn participants_without_matches_are_listed_in_registration_order() {
    let ids: Vec<_> = (0..3).map(|_| uuid::Uuid::new_v4()).collect();
    let table = compute_standings(&ids, &[]);
    let order: Vec<_> = table.iter().map(|s| s.athlete_id).collect();
    assert_eq!(order, ids);
    assert!(table.iter().all(|s| s.furthest_round == 0 && s.played() == 0));
}
