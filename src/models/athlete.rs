//! AthleteProfile and AthletePatch data structures.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an athlete (the owning user's id).
pub type AthleteId = Uuid;

/// The part of an athlete profile the bracket engine reads and writes.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AthleteProfile {
    pub user_id: AthleteId,
    pub display_name: String,
    /// Only ever increases.
    pub wins: u32,
    /// Only ever increases.
    pub losses: u32,
}

impl AthleteProfile {
    /// Create a new profile with no recorded matches.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), display_name)
    }

    pub fn with_id(user_id: AthleteId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            display_name: display_name.into(),
            wins: 0,
            losses: 0,
        }
    }

    /// Patch that records one more win.
    pub fn win_patch(&self) -> AthletePatch {
        AthletePatch {
            wins: Some(self.wins + 1),
            ..AthletePatch::default()
        }
    }

    /// Patch that records one more loss.
    pub fn loss_patch(&self) -> AthletePatch {
        AthletePatch {
            losses: Some(self.losses + 1),
            ..AthletePatch::default()
        }
    }

    /// Merge the set fields of `patch` into this profile.
    pub fn apply(&mut self, patch: &AthletePatch) {
        if let Some(name) = &patch.display_name {
            self.display_name = name.clone();
        }
        if let Some(wins) = patch.wins {
            self.wins = wins;
        }
        if let Some(losses) = patch.losses {
            self.losses = losses;
        }
    }
}

/// Partial update of an athlete profile; `None` leaves the field untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AthletePatch {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub wins: Option<u32>,
    #[serde(default)]
    pub losses: Option<u32>,
}
