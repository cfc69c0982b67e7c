//! Standings derived from one bracket's matches.

use crate::models::{AthleteId, BracketId, GameMatch, MatchStatus, Side};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Standing {
    pub athlete_id: AthleteId,
    /// Highest round the athlete is drawn into (0 when in no match).
    pub furthest_round: u32,
    pub wins: u32,
    pub losses: u32,
    pub sets_won: u32,
    pub sets_lost: u32,
}

impl Standing {
    pub fn played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn win_percentage(&self) -> f64 {
        if self.played() == 0 {
            0.0
        } else {
            f64::from(self.wins) * 100.0 / f64::from(self.played())
        }
    }

    pub fn set_difference(&self) -> i64 {
        i64::from(self.sets_won) - i64::from(self.sets_lost)
    }

    /// Exact comparison of win rates (no floating point).
    fn cmp_win_rate(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.wins) * u64::from(other.played());
        let rhs = u64::from(other.wins) * u64::from(self.played());
        lhs.cmp(&rhs)
    }
}

/// The bracket of the most recently created first-round match.
pub fn latest_bracket_id(matches: &[GameMatch]) -> Option<BracketId> {
    matches
        .iter()
        .rev()
        .find(|m| m.position.round == 1)
        .map(|m| m.position.bracket_id)
}

/// Rank `participants` by their results in `matches`.
///
/// Order: furthest round, wins, win percentage, set difference (all
/// descending), then registration order. Cancelled matches are ignored;
/// unfinished ones only count towards the furthest round.
pub fn compute_standings(participants: &[AthleteId], matches: &[GameMatch]) -> Vec<Standing> {
    let mut table: HashMap<AthleteId, Standing> = participants
        .iter()
        .map(|&id| {
            (
                id,
                Standing {
                    athlete_id: id,
                    ..Standing::default()
                },
            )
        })
        .collect();

    for m in matches.iter().filter(|m| m.status != MatchStatus::Cancelled) {
        let (one_sets, two_sets) = m.scores.set_wins();
        for side in [Side::PlayerOne, Side::PlayerTwo] {
            let Some(id) = m.entrant(side).athlete() else {
                continue;
            };
            let Some(row) = table.get_mut(&id) else {
                continue;
            };
            row.furthest_round = row.furthest_round.max(m.position.round);
            if m.status != MatchStatus::Completed {
                continue;
            }
            let (won, lost) = match side {
                Side::PlayerOne => (one_sets, two_sets),
                Side::PlayerTwo => (two_sets, one_sets),
            };
            row.sets_won += won;
            row.sets_lost += lost;
            match m.winner {
                Some(w) if w == id => row.wins += 1,
                Some(_) => row.losses += 1,
                None => {}
            }
        }
    }

    let order: HashMap<AthleteId, usize> = participants.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    let mut standings: Vec<Standing> = table.into_values().collect();
    standings.sort_by(|a, b| {
        b.furthest_round
            .cmp(&a.furthest_round)
            .then(b.wins.cmp(&a.wins))
            .then(b.cmp_win_rate(a))
            .then(b.set_difference().cmp(&a.set_difference()))
            .then(order[&a.athlete_id].cmp(&order[&b.athlete_id]))
    });
    standings
}
