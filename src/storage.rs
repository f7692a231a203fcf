//! Autosave and resume: the whole session serializes to one JSON file.

use crate::models::Session;
use std::fs;
use std::io;
use std::path::Path;

/// Write the session snapshot. Callers treat failure as advisory: the
/// in-memory session stays authoritative.
pub fn save(path: &Path, session: &Session) -> io::Result<()> {
    let json = serde_json::to_string_pretty(session)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    fs::write(path, json)
}

/// Load a previously saved session. A missing or malformed file means
/// "start empty": returns None and logs why.
pub fn load(path: &Path) -> Option<Session> {
    if !path.exists() {
        return None;
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("Could not read saved session {}: {}", path.display(), e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::warn!("Ignoring malformed saved session {}: {}", path.display(), e);
            None
        }
    }
}
