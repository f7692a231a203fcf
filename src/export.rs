//! Tabular export: game history and player standings as CSV.

use crate::models::{PlayerId, Session};
use std::io;

fn name_of(session: &Session, id: PlayerId) -> String {
    session
        .player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}

fn team_names(session: &Session, ids: &[PlayerId]) -> String {
    ids.iter()
        .map(|&id| name_of(session, id))
        .collect::<Vec<_>>()
        .join(" / ")
}

fn finish(mut wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, csv::Error> {
    wtr.flush()?;
    match wtr.into_inner() {
        Ok(buf) => Ok(buf),
        Err(e) => Err(csv::Error::from(io::Error::new(
            io::ErrorKind::Other,
            e.error().to_string(),
        ))),
    }
}

/// Game log as CSV: one row per completed game, in completion order.
pub fn history_csv(session: &Session) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["timestamp", "court", "team_a", "team_b", "winner"])?;
    for rec in &session.history {
        wtr.write_record([
            rec.recorded_at.to_rfc3339(),
            rec.court.to_string(),
            team_names(session, &rec.team_a),
            team_names(session, &rec.team_b),
            rec.winning_team.label().to_string(),
        ])?;
    }
    finish(wtr)
}

/// Player standings as CSV: one row per registered player, with their
/// counters, status, and place in the waiting line (blank while playing).
pub fn players_csv(session: &Session) -> Result<Vec<u8>, csv::Error> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(["player", "games_played", "consecutive_wins", "status", "queue_position"])?;
    for p in &session.players {
        let position = session
            .queue
            .iter()
            .position(|id| *id == p.id)
            .map(|i| (i + 1).to_string())
            .unwrap_or_default();
        wtr.write_record([
            p.name.clone(),
            p.games_played.to_string(),
            p.consecutive_wins.to_string(),
            p.status.label().to_string(),
            position,
        ])?;
    }
    finish(wtr)
}
