//! Seeding: order a tournament's participants into bracket positions.

use crate::models::{AthleteId, EngineError, Seed};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Assign seed positions `1..=n` to the participants.
///
/// With `explicit_seeds` the given order is used verbatim; it must be a
/// permutation of `participants`. Without it the order is a uniform shuffle
/// (Fisher-Yates, via `SliceRandom::shuffle`).
pub fn generate_seeds<R: Rng + ?Sized>(
    participants: &[AthleteId],
    explicit_seeds: Option<&[AthleteId]>,
    rng: &mut R,
) -> Result<Vec<Seed>, EngineError> {
    let order = match explicit_seeds {
        Some(explicit) => {
            check_permutation(participants, explicit)?;
            explicit.to_vec()
        }
        None => {
            let mut order = participants.to_vec();
            order.shuffle(rng);
            order
        }
    };
    Ok(order
        .into_iter()
        .enumerate()
        .map(|(i, athlete_id)| Seed {
            position: i as u32 + 1,
            athlete_id,
        })
        .collect())
}

fn check_permutation(participants: &[AthleteId], explicit: &[AthleteId]) -> Result<(), EngineError> {
    let mut seen = HashSet::with_capacity(explicit.len());
    for &id in explicit {
        if !seen.insert(id) {
            return Err(EngineError::DuplicateParticipant(id));
        }
    }
    let expected: HashSet<_> = participants.iter().copied().collect();
    let missing: Vec<_> = participants.iter().copied().filter(|id| !seen.contains(id)).collect();
    let extra: Vec<_> = explicit.iter().copied().filter(|id| !expected.contains(id)).collect();
    if !missing.is_empty() || !extra.is_empty() {
        return Err(EngineError::SeedMismatch { missing, extra });
    }
    Ok(())
}
