//! Integration tests for the registry, queue, snapshots, and exports.

use pickleball_open_play::{
    add_player, export, storage, submit_result, PlayerId, PlayerStatus, RotationQueue, Session,
    SessionConfig, SessionError, Team,
};
use uuid::Uuid;

fn session(max_consecutive_wins: u32, num_courts: u32) -> Session {
    Session::new(SessionConfig {
        max_consecutive_wins,
        num_courts,
    })
}

fn add_players(s: &mut Session, n: usize) -> Vec<PlayerId> {
    (1..=n)
        .map(|i| add_player(s, format!("P{i}")).unwrap())
        .collect()
}

#[test]
fn duplicate_names_rejected_case_insensitive() {
    let mut s = session(2, 1);
    s.register_player("Alice").unwrap();
    assert_eq!(
        s.register_player("alice").unwrap_err(),
        SessionError::DuplicatePlayer
    );
    assert_eq!(
        add_player(&mut s, "  ALICE  ").unwrap_err(),
        SessionError::DuplicatePlayer
    );
    assert_eq!(s.players.len(), 1);
}

#[test]
fn operations_on_unknown_players_fail() {
    let mut s = session(2, 1);
    let ghost = Uuid::new_v4();
    assert_eq!(
        s.record_result(ghost, true).unwrap_err(),
        SessionError::UnknownPlayer(ghost)
    );
    assert_eq!(
        s.reset_streak(ghost).unwrap_err(),
        SessionError::UnknownPlayer(ghost)
    );
    assert_eq!(
        s.set_status(ghost, PlayerStatus::Playing).unwrap_err(),
        SessionError::UnknownPlayer(ghost)
    );
}

#[test]
fn double_enqueue_rejected() {
    let mut s = session(2, 1);
    let id = s.register_player("Alice").unwrap();
    s.queue.enqueue(id).unwrap();
    assert_eq!(
        s.queue.enqueue(id).unwrap_err(),
        SessionError::AlreadyQueued(id)
    );
    assert_eq!(s.queue.len(), 1);
}

#[test]
fn queue_is_fifo_and_peek_does_not_remove() {
    let mut q = RotationQueue::new();
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    q.enqueue(a).unwrap();
    q.enqueue(b).unwrap();
    q.enqueue(c).unwrap();

    assert_eq!(q.peek(2), vec![a, b]);
    assert_eq!(q.len(), 3);

    assert_eq!(q.dequeue(2).unwrap(), vec![a, b]);
    q.requeue(&[a]);
    let order: Vec<PlayerId> = q.iter().copied().collect();
    assert_eq!(order, vec![c, a]);
}

#[test]
fn config_values_below_one_are_raised() {
    let s = session(0, 0);
    assert_eq!(s.config.max_consecutive_wins, 1);
    assert_eq!(s.config.num_courts, 1);
    assert_eq!(s.courts.len(), 1);
}

#[test]
fn courts_are_numbered_from_one() {
    let s = session(2, 3);
    let ids: Vec<u32> = s.courts.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut s = session(2, 1);
    add_players(&mut s, 5);
    submit_result(&mut s, 1, Team::A).unwrap();

    let json = serde_json::to_string(&s).unwrap();
    let restored: Session = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, s);
}

#[test]
fn storage_treats_missing_or_malformed_file_as_empty() {
    let path = std::env::temp_dir().join(format!("pickleball_test_{}.json", Uuid::new_v4()));
    assert!(storage::load(&path).is_none());

    std::fs::write(&path, "not json at all").unwrap();
    assert!(storage::load(&path).is_none());

    let mut s = session(2, 2);
    add_players(&mut s, 6);
    storage::save(&path, &s).unwrap();
    assert_eq!(storage::load(&path), Some(s));

    std::fs::remove_file(&path).ok();
}

#[test]
fn history_export_lists_games_with_names() {
    let mut s = session(2, 1);
    add_players(&mut s, 5);
    submit_result(&mut s, 1, Team::A).unwrap();

    let csv = String::from_utf8(export::history_csv(&s).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "timestamp,court,team_a,team_b,winner");
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("P1 / P2"));
    assert!(lines[1].contains("P3 / P4"));
    assert!(lines[1].ends_with(",A"));
}

#[test]
fn standings_export_includes_queue_positions() {
    let mut s = session(2, 1);
    add_players(&mut s, 5);
    submit_result(&mut s, 1, Team::A).unwrap();

    // P3 and P4 lost and are back in line, in that order.
    let csv = String::from_utf8(export::players_csv(&s).unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "player,games_played,consecutive_wins,status,queue_position"
    );
    assert_eq!(lines.len(), 6);
    assert!(lines.contains(&"P3,1,0,waiting,1"));
    assert!(lines.contains(&"P4,1,0,waiting,2"));
    assert!(lines.contains(&"P1,1,1,playing,"));
}
