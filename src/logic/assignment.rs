//! Court filling: seat waiting players and split them into teams.

use crate::models::{CourtId, CourtStatus, PlayerId, PlayerStatus, Session, SessionError, COURT_CAPACITY};

/// Outcome of a fill attempt on one court.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FillOutcome {
    /// Court reached four players; teams were committed and play can start.
    GameReady,
    /// Not enough eligible waiting players; the court waits for arrivals.
    AwaitingPlayers { seated: usize, missing: usize },
    /// Court already has a game running; nothing to do.
    Unchanged,
}

/// The three ways to split four seats into two teams of two, as seat-index
/// pairs. Listed in lexicographic seat order, which doubles as the
/// tie-break: the first split with the lowest score wins.
const SPLITS: [([usize; 2], [usize; 2]); 3] = [
    ([0, 1], [2, 3]),
    ([0, 2], [1, 3]),
    ([0, 3], [1, 2]),
];

/// Top up one court from the queue.
///
/// A court that already has occupants (staying winners or an earlier short
/// draw) takes whatever is eligible. An empty court seats players only when
/// a full four are eligible, so nobody is parked on a court that cannot
/// start. Players resting from this court's last game are passed over
/// without losing their place in line.
pub fn fill_court(session: &mut Session, court_id: CourtId) -> Result<FillOutcome, SessionError> {
    let (resting, seated) = {
        let court = session
            .court(court_id)
            .ok_or(SessionError::InvalidCourt(court_id))?;
        if court.status == CourtStatus::Active {
            return Ok(FillOutcome::Unchanged);
        }
        (court.resting.clone(), court.pending.len())
    };

    let missing = COURT_CAPACITY - seated;
    if seated == 0 && session.queue.eligible(&resting) < COURT_CAPACITY {
        return Ok(FillOutcome::AwaitingPlayers { seated: 0, missing });
    }

    let drawn = session.queue.draw_up_to(missing, &resting);
    for &id in &drawn {
        session.set_status(id, PlayerStatus::Playing)?;
    }

    let seats = {
        let court = session
            .court_mut(court_id)
            .ok_or(SessionError::InvalidCourt(court_id))?;
        court.pending.extend(drawn.iter().copied());
        court.pending.clone()
    };

    if seats.len() < COURT_CAPACITY {
        let court = session
            .court_mut(court_id)
            .ok_or(SessionError::InvalidCourt(court_id))?;
        court.status = if court.pending.is_empty() {
            CourtStatus::Empty
        } else {
            CourtStatus::Filling
        };
        return Ok(FillOutcome::AwaitingPlayers {
            seated: seats.len(),
            missing: COURT_CAPACITY - seats.len(),
        });
    }

    let (team_a, team_b) = best_split(session, &seats);
    session.pair_history.record_teammates(team_a[0], team_a[1]);
    session.pair_history.record_teammates(team_b[0], team_b[1]);

    let court = session
        .court_mut(court_id)
        .ok_or(SessionError::InvalidCourt(court_id))?;
    court.pending.clear();
    court.team_a = team_a.to_vec();
    court.team_b = team_b.to_vec();
    court.status = CourtStatus::Active;
    Ok(FillOutcome::GameReady)
}

/// Choose the team split with the fewest repeat pairings; the first listed
/// split wins ties. Team A is the team containing seat 0.
fn best_split(session: &Session, seats: &[PlayerId]) -> ([PlayerId; 2], [PlayerId; 2]) {
    debug_assert_eq!(seats.len(), COURT_CAPACITY);
    let mut best = &SPLITS[0];
    let mut best_score = u32::MAX;
    for split in &SPLITS {
        let score = session.pair_history.pair_count(seats[split.0[0]], seats[split.0[1]])
            + session.pair_history.pair_count(seats[split.1[0]], seats[split.1[1]]);
        if score < best_score {
            best_score = score;
            best = split;
        }
    }
    (
        [seats[best.0[0]], seats[best.0[1]]],
        [seats[best.1[0]], seats[best.1[1]]],
    )
}

/// Run a fill pass over every court without a running game, in court order.
/// Returns the per-court outcomes so the caller can report courts left short.
pub fn fill_open_courts(session: &mut Session) -> Result<Vec<(CourtId, FillOutcome)>, SessionError> {
    let ids: Vec<CourtId> = session.courts.iter().map(|c| c.id).collect();
    let mut outcomes = Vec::new();
    for id in ids {
        let outcome = fill_court(session, id)?;
        if outcome != FillOutcome::Unchanged {
            outcomes.push((id, outcome));
        }
    }
    Ok(outcomes)
}
