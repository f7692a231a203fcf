//! Game log and teammate pairing history.

use crate::models::court::{CourtId, Team};
use crate::models::player::PlayerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed game, appended to the session log in completion order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub court: CourtId,
    pub team_a: Vec<PlayerId>,
    pub team_b: Vec<PlayerId>,
    pub winning_team: Team,
    pub recorded_at: DateTime<Utc>,
}

/// How many times an unordered pair of players has shared a team.
/// Ids are stored normalized (`a <= b`).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairRecord {
    pub a: PlayerId,
    pub b: PlayerId,
    pub count: u32,
}

/// Past teammate pairings. A read signal that biases team formation away
/// from repeats; it never blocks a pairing.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairHistory {
    records: Vec<PairRecord>,
}

impl PairHistory {
    pub fn new() -> Self {
        Self::default()
    }

    fn ordered(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Count one more game with `a` and `b` on the same team.
    pub fn record_teammates(&mut self, a: PlayerId, b: PlayerId) {
        let (a, b) = Self::ordered(a, b);
        if let Some(r) = self.records.iter_mut().find(|r| r.a == a && r.b == b) {
            r.count += 1;
        } else {
            self.records.push(PairRecord { a, b, count: 1 });
        }
    }

    /// Times `a` and `b` have been teammates (0 if never).
    pub fn pair_count(&self, a: PlayerId, b: PlayerId) -> u32 {
        let (a, b) = Self::ordered(a, b);
        self.records
            .iter()
            .find(|r| r.a == a && r.b == b)
            .map(|r| r.count)
            .unwrap_or(0)
    }
}
