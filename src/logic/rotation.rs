//! Game results: winner-stay, loser-requeue, and the arrival flow.

use crate::logic::assignment::{fill_court, fill_open_courts, FillOutcome};
use crate::models::{
    CourtId, CourtStatus, GameRecord, PlayerId, PlayerStatus, Session, SessionError, Team,
};
use chrono::Utc;

/// Resolve which team a pair of reported winners is on.
///
/// The court must exist and have a game running; the ids must be exactly one
/// of its two teams.
pub fn resolve_winning_team(
    session: &Session,
    court_id: CourtId,
    winners: &[PlayerId],
) -> Result<Team, SessionError> {
    let court = session
        .court(court_id)
        .ok_or(SessionError::InvalidCourt(court_id))?;
    if court.status != CourtStatus::Active {
        return Err(SessionError::InvalidCourt(court_id));
    }
    let matches_team = |team: &[PlayerId]| {
        winners.len() == team.len() && team.iter().all(|id| winners.contains(id))
    };
    if matches_team(&court.team_a) {
        Ok(Team::A)
    } else if matches_team(&court.team_b) {
        Ok(Team::B)
    } else {
        Err(SessionError::InvalidTeam)
    }
}

/// Process a reported game result on one court.
///
/// Losers go to the back of the line. Winners stay seated unless the result
/// put them at the streak cap, in which case they rotate out behind the
/// losers. Everyone rotated off becomes this court's resting set, and the
/// court is topped back up from the queue.
pub fn submit_result(
    session: &mut Session,
    court_id: CourtId,
    winning_team: Team,
) -> Result<FillOutcome, SessionError> {
    let (team_a, team_b) = {
        let court = session
            .court(court_id)
            .ok_or(SessionError::InvalidCourt(court_id))?;
        if court.status != CourtStatus::Active {
            return Err(SessionError::InvalidCourt(court_id));
        }
        (court.team_a.clone(), court.team_b.clone())
    };

    session.history.push(GameRecord {
        court: court_id,
        team_a: team_a.clone(),
        team_b: team_b.clone(),
        winning_team,
        recorded_at: Utc::now(),
    });

    let (winners, losers) = match winning_team {
        Team::A => (team_a, team_b),
        Team::B => (team_b, team_a),
    };

    // Losers first, then capped winners, both in court-position order, so
    // the back of the queue is deterministic.
    let mut rotated_off: Vec<PlayerId> = Vec::new();
    for &id in &losers {
        session.record_result(id, false)?;
        session.set_status(id, PlayerStatus::Waiting)?;
        rotated_off.push(id);
    }

    let cap = session.config.max_consecutive_wins;
    let mut staying: Vec<PlayerId> = Vec::new();
    for &id in &winners {
        session.record_result(id, true)?;
        let streak = session
            .player(id)
            .ok_or(SessionError::UnknownPlayer(id))?
            .consecutive_wins;
        if streak >= cap {
            session.reset_streak(id)?;
            session.set_status(id, PlayerStatus::Waiting)?;
            rotated_off.push(id);
        } else {
            staying.push(id);
        }
    }

    session.queue.requeue(&rotated_off);

    {
        let court = session
            .court_mut(court_id)
            .ok_or(SessionError::InvalidCourt(court_id))?;
        court.team_a.clear();
        court.team_b.clear();
        court.pending = staying;
        court.status = if court.pending.is_empty() {
            CourtStatus::Empty
        } else {
            CourtStatus::Filling
        };
        court.resting = rotated_off;
    }

    let outcome = fill_court(session, court_id)?;
    // Freshly requeued players may complete a short-handed court elsewhere.
    fill_open_courts(session)?;
    Ok(outcome)
}

/// Register a player, put them at the back of the line, and run a fill pass
/// so an open court can pick them up right away.
pub fn add_player(
    session: &mut Session,
    name: impl Into<String>,
) -> Result<PlayerId, SessionError> {
    let id = session.register_player(name)?;
    session.queue.enqueue(id)?;
    fill_open_courts(session)?;
    Ok(id)
}
