//! Pickleball open play session manager: library with models and rotation logic.

pub mod export;
pub mod logic;
pub mod models;
pub mod storage;

pub use logic::{
    add_player, fill_court, fill_open_courts, resolve_winning_team, submit_result, FillOutcome,
};
pub use models::{
    Court, CourtId, CourtStatus, GameRecord, PairHistory, PairRecord, Player, PlayerId,
    PlayerStatus, RotationQueue, Session, SessionConfig, SessionError, Team, COURT_CAPACITY,
};
