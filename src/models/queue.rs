//! The waiting line: arrival order decides who plays next.

use crate::models::player::PlayerId;
use crate::models::session::SessionError;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ordered line of waiting players. Front = next to be seated; new arrivals
/// and returning players join at the back.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RotationQueue {
    players: VecDeque<PlayerId>,
}

impl RotationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a newly waiting player at the back.
    pub fn enqueue(&mut self, id: PlayerId) -> Result<(), SessionError> {
        if self.players.contains(&id) {
            return Err(SessionError::AlreadyQueued(id));
        }
        self.players.push_back(id);
        Ok(())
    }

    /// Remove and return the first `n` players in order.
    pub fn dequeue(&mut self, n: usize) -> Result<Vec<PlayerId>, SessionError> {
        if self.players.len() < n {
            return Err(SessionError::InsufficientPlayers {
                needed: n,
                available: self.players.len(),
            });
        }
        Ok(self.players.drain(..n).collect())
    }

    /// The first `n` players (fewer if the line is shorter), without removal.
    pub fn peek(&self, n: usize) -> Vec<PlayerId> {
        self.players.iter().take(n).copied().collect()
    }

    /// Append players at the back in the given order (returning losers or
    /// capped-out winners).
    pub fn requeue(&mut self, players: &[PlayerId]) {
        for &id in players {
            self.players.push_back(id);
        }
    }

    /// Remove and return up to `n` players from the front, passing over any
    /// in `skip`. Skipped players keep their place in line.
    pub fn draw_up_to(&mut self, n: usize, skip: &[PlayerId]) -> Vec<PlayerId> {
        let mut drawn = Vec::new();
        let mut kept = VecDeque::with_capacity(self.players.len());
        while let Some(id) = self.players.pop_front() {
            if drawn.len() < n && !skip.contains(&id) {
                drawn.push(id);
            } else {
                kept.push_back(id);
            }
        }
        self.players = kept;
        drawn
    }

    /// How many queued players could be drawn right now given `skip`.
    pub fn eligible(&self, skip: &[PlayerId]) -> usize {
        self.players.iter().filter(|id| !skip.contains(id)).count()
    }

    pub fn contains(&self, id: &PlayerId) -> bool {
        self.players.contains(id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Queue contents front to back.
    pub fn iter(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.iter()
    }
}
