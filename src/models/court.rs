//! Court occupancy: seats, teams, and the per-court state machine.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};

/// Identifier for a court (1-based, fixed at session start).
pub type CourtId = u32;

/// Players on a court when a game is on.
pub const COURT_CAPACITY: usize = 4;

/// Which side of the court a team is on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    A,
    B,
}

impl Team {
    /// Short label for logs and exports.
    pub fn label(self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }
}

/// Per-court lifecycle: Empty → Filling → Active → (result) → Filling → …
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourtStatus {
    #[default]
    Empty,
    /// Some players seated, waiting for a full four.
    Filling,
    /// Four players in two teams, game in progress.
    Active,
}

/// A court: empty, partially seated, or hosting a 2v2 game.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub status: CourtStatus,
    /// Seated players not yet formed into teams (Empty/Filling only).
    pub pending: Vec<PlayerId>,
    /// Team A players (exactly 2 while Active, empty otherwise).
    pub team_a: Vec<PlayerId>,
    /// Team B players.
    pub team_b: Vec<PlayerId>,
    /// Players rotated off by this court's last result; they sit out the
    /// next draw onto this court but keep their place in the queue.
    #[serde(default)]
    pub resting: Vec<PlayerId>,
}

impl Court {
    /// Create an empty court with the given id.
    pub fn new(id: CourtId) -> Self {
        Self {
            id,
            status: CourtStatus::Empty,
            pending: Vec::new(),
            team_a: Vec::new(),
            team_b: Vec::new(),
            resting: Vec::new(),
        }
    }

    /// All players seated here, in seat-priority order (team A, team B,
    /// then pending).
    pub fn occupants(&self) -> Vec<PlayerId> {
        let mut ids = self.team_a.clone();
        ids.extend(self.team_b.iter().copied());
        ids.extend(self.pending.iter().copied());
        ids
    }
}
