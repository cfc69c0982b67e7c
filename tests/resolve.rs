//! Integration tests for winner resolution from set scores.

use table_tennis_bracket::{
    resolve_winner, resolve_winner_id, BracketPosition, EngineError, Entrant, GameMatch, NewMatch,
    SchedulingDefaults, SetScores, Side,
};
use uuid::Uuid;

fn scores(one: &[u32], two: &[u32]) -> SetScores {
    SetScores::new(one.to_vec(), two.to_vec())
}

#[test]
fn player_one_wins_two_sets_to_one() {
    assert_eq!(resolve_winner(&scores(&[11, 9, 11], &[9, 11, 8])), Ok(Some(Side::PlayerOne)));
}

#[test]
fn player_two_wins_straight_sets() {
    assert_eq!(resolve_winner(&scores(&[5, 7], &[11, 11])), Ok(Some(Side::PlayerTwo)));
}

#[test]
fn no_sets_is_undetermined() {
    assert_eq!(resolve_winner(&scores(&[], &[])), Ok(None));
}

#[test]
fn split_sets_are_undetermined() {
    assert_eq!(resolve_winner(&scores(&[11, 9], &[9, 11])), Ok(None));
}

#[test]
fn level_sets_count_for_neither_side() {
    assert_eq!(resolve_winner(&scores(&[10, 11, 3], &[10, 4, 3])), Ok(Some(Side::PlayerOne)));
}

#[test]
fn unequal_lengths_are_rejected() {
    assert_eq!(
        resolve_winner(&scores(&[1, 2], &[1])),
        Err(EngineError::UnequalScoreLengths {
            player_one: 2,
            player_two: 1,
        })
    );
}

fn game(one: Entrant, two: Entrant) -> GameMatch {
    let defaults = SchedulingDefaults {
        time: chrono::Utc::now(),
        location: None,
    };
    let position = BracketPosition {
        bracket_id: Uuid::new_v4(),
        bracket_size: 4,
        round: 2,
        slot: 0,
    };
    GameMatch::from_new(
        Uuid::new_v4(),
        NewMatch::scheduled(Uuid::new_v4(), position, one, two, &defaults),
    )
}

#[test]
fn winner_id_maps_side_to_athlete() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let m = game(Entrant::Athlete(a), Entrant::Athlete(b));
    assert_eq!(resolve_winner_id(&m, &scores(&[3, 4, 5], &[11, 11, 11])), Ok(Some(b)));
    assert_eq!(resolve_winner_id(&m, &scores(&[], &[])), Ok(None));
}

#[test]
fn winner_id_on_tbd_side_is_an_error() {
    let m = game(Entrant::Athlete(Uuid::new_v4()), Entrant::Tbd);
    assert_eq!(
        resolve_winner_id(&m, &scores(&[3], &[11])),
        Err(EngineError::UnresolvedEntrant(m.id))
    );
}
