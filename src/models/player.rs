//! Player identity and participation counters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in courts, the queue, and lookups).
pub type PlayerId = Uuid;

/// Where a player currently is: in the waiting line or on a court.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    Waiting,
    Playing,
}

impl PlayerStatus {
    /// Short label for exports.
    pub fn label(self) -> &'static str {
        match self {
            PlayerStatus::Waiting => "waiting",
            PlayerStatus::Playing => "playing",
        }
    }
}

/// A player in the open play session.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub games_played: u32,
    /// Wins in a row on the current court run; resets on a loss or on
    /// rotating out at the streak cap.
    pub consecutive_wins: u32,
    pub status: PlayerStatus,
}

impl Player {
    /// Create a new player with the given name, zero counters, status Waiting.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            games_played: 0,
            consecutive_wins: 0,
            status: PlayerStatus::Waiting,
        }
    }

    /// Record a finished game for this player.
    pub fn record_result(&mut self, won: bool) {
        self.games_played += 1;
        if won {
            self.consecutive_wins += 1;
        } else {
            self.consecutive_wins = 0;
        }
    }

    /// Clear the win streak (used when the streak cap rotates a winner out).
    pub fn reset_streak(&mut self) {
        self.consecutive_wins = 0;
    }
}
