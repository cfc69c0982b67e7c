//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use table_tennis_bracket::{
    generate_bracket, record_match_update, AthleteId, AthleteProfile, AthleteStore, Bracket, GameMatch, MatchId,
    MatchPatch, MatchStatus, MatchStore, MatchUpdateOutcome, MemoryStore, SetScores, Tournament, TournamentFormat,
};

pub fn start_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap()
}

pub fn add_athletes(store: &MemoryStore, n: usize) -> Vec<AthleteId> {
    (0..n)
        .map(|i| {
            let p = AthleteProfile::new(format!("Athlete {i}"));
            let id = p.user_id;
            store.put_athlete(p).unwrap();
            id
        })
        .collect()
}

/// Store holding `n` athletes registered for one tournament.
pub fn tournament_with_athletes(format: TournamentFormat, n: usize) -> (MemoryStore, Tournament, Vec<AthleteId>) {
    let store = MemoryStore::new();
    let ids = add_athletes(&store, n);
    let mut t = Tournament::new("Spring Open", format, start_date(), 64).with_participants(ids.clone());
    t.location = Some("Hall A".to_string());
    store.put_tournament(t.clone()).unwrap();
    (store, t, ids)
}

/// Bracket seeded in registration order.
pub async fn bracket_in_order(store: &MemoryStore, t: &Tournament) -> Bracket {
    let mut rng = StdRng::seed_from_u64(7);
    generate_bracket(store, store, t.id, Some(t.registered_participants.as_slice()), &mut rng)
        .await
        .unwrap()
}

pub async fn complete(store: &MemoryStore, match_id: MatchId, one: Vec<u32>, two: Vec<u32>) -> MatchUpdateOutcome {
    let patch = MatchPatch {
        scores: Some(SetScores::new(one, two)),
        status: Some(MatchStatus::Completed),
        ..MatchPatch::default()
    };
    record_match_update(store, store, store, match_id, patch).await.unwrap()
}

pub async fn profile(store: &MemoryStore, id: AthleteId) -> AthleteProfile {
    store.get_athlete_profile(id).await.unwrap().unwrap()
}

pub async fn match_at(store: &MemoryStore, t: &Tournament, round: u32, slot: usize) -> Option<GameMatch> {
    store
        .list_matches_by_tournament(t.id)
        .await
        .unwrap()
        .into_iter()
        .find(|m| m.position.round == round && m.position.slot == slot)
}
