//! Session state: config, players, queue, courts, history.

use crate::models::court::{Court, CourtId};
use crate::models::history::{GameRecord, PairHistory};
use crate::models::player::{Player, PlayerId, PlayerStatus};
use crate::models::queue::RotationQueue;
use serde::{Deserialize, Serialize};

/// Errors that can occur during session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayer,
    /// Player id not known to the session.
    UnknownPlayer(PlayerId),
    /// Player is already in the waiting line.
    AlreadyQueued(PlayerId),
    /// Not enough waiting players for the requested draw.
    InsufficientPlayers { needed: usize, available: usize },
    /// Court id not known, or the court has no game to act on.
    InvalidCourt(CourtId),
    /// Submitted winners do not match either team on the court.
    InvalidTeam,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::DuplicatePlayer => write!(f, "A player with this name already exists"),
            SessionError::UnknownPlayer(_) => write!(f, "Player not found"),
            SessionError::AlreadyQueued(_) => write!(f, "Player is already in the queue"),
            SessionError::InsufficientPlayers { needed, available } => {
                write!(f, "Not enough waiting players (need {}, have {})", needed, available)
            }
            SessionError::InvalidCourt(id) => write!(f, "No active game on court {}", id),
            SessionError::InvalidTeam => {
                write!(f, "Winners do not match either team on that court")
            }
        }
    }
}

/// Per-session settings, supplied at session start and immutable afterwards.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Games a player may win in a row before rotating out regardless of outcome.
    pub max_consecutive_wins: u32,
    /// Number of courts available for the whole session.
    pub num_courts: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_consecutive_wins: 2,
            num_courts: 3,
        }
    }
}

/// Full open-play session state. The session object exclusively owns the
/// player registry, queue, courts, pairing history, and game log; all
/// mutation goes through its methods and the functions in `logic`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub config: SessionConfig,
    /// Every registered player.
    pub players: Vec<Player>,
    /// Waiting line, front = next to be seated.
    pub queue: RotationQueue,
    /// Fixed set of courts, ids 1..=num_courts.
    pub courts: Vec<Court>,
    /// Past teammate pairings.
    pub pair_history: PairHistory,
    /// Completed games, in completion order.
    pub history: Vec<GameRecord>,
}

impl Session {
    /// Create a new session. Config values below 1 are raised to 1.
    pub fn new(config: SessionConfig) -> Self {
        let config = SessionConfig {
            max_consecutive_wins: config.max_consecutive_wins.max(1),
            num_courts: config.num_courts.max(1),
        };
        let courts = (1..=config.num_courts).map(Court::new).collect();
        Self {
            config,
            players: Vec::new(),
            queue: RotationQueue::new(),
            courts,
            pair_history: PairHistory::new(),
            history: Vec::new(),
        }
    }

    /// Register a new player with zero counters and status Waiting. Names
    /// must be unique (case-insensitive). Does not put them in the queue;
    /// see `logic::add_player` for the full arrival flow.
    pub fn register_player(&mut self, name: impl Into<String>) -> Result<PlayerId, SessionError> {
        let name = name.into();
        let trimmed = name.trim();
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(trimmed));
        if is_duplicate {
            return Err(SessionError::DuplicatePlayer);
        }
        let player = Player::new(trimmed);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// A registered player by id.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Mutable reference to a registered player by id.
    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    /// Record a finished game for one player, updating their counters.
    pub fn record_result(&mut self, id: PlayerId, won: bool) -> Result<(), SessionError> {
        self.player_mut(id)
            .ok_or(SessionError::UnknownPlayer(id))?
            .record_result(won);
        Ok(())
    }

    /// Reset a player's win streak to zero.
    pub fn reset_streak(&mut self, id: PlayerId) -> Result<(), SessionError> {
        self.player_mut(id)
            .ok_or(SessionError::UnknownPlayer(id))?
            .reset_streak();
        Ok(())
    }

    /// Set a player's waiting/playing status. Side effect only; no
    /// validation beyond existence.
    pub fn set_status(&mut self, id: PlayerId, status: PlayerStatus) -> Result<(), SessionError> {
        self.player_mut(id)
            .ok_or(SessionError::UnknownPlayer(id))?
            .status = status;
        Ok(())
    }

    /// A court by id.
    pub fn court(&self, id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == id)
    }

    /// Mutable reference to a court by id.
    pub fn court_mut(&mut self, id: CourtId) -> Option<&mut Court> {
        self.courts.iter_mut().find(|c| c.id == id)
    }
}
