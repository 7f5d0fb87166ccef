//! Two-step delete confirmation.
//!
//! Each session is either idle or holds exactly one pending delete:
//!
//! ```text
//! Idle --mark--> PendingDelete(target) --confirm|cancel--> Idle
//! ```
//!
//! Sessions are identified by an opaque [`SessionId`] handed out by
//! [`DeleteConfirmations::mark`]. The table is persisted as JSON so a mark
//! and its confirmation can happen in separate invocations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use std::{fmt, fs, str::FromStr};
use tempfile::NamedTempFile;
use thiserror::Error;
use uuid::Uuid;
use wql_core::Location;

#[derive(Error, Debug)]
pub enum ConfirmError {
    #[error("Invalid session id {0:?}")]
    InvalidSession(String),

    #[error("Session {0} has no pending delete")]
    NotPending(SessionId),

    #[error("Failed to access session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to replace session file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Opaque session identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for SessionId {
    type Err = ConfirmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(SessionId)
            .map_err(|_| ConfirmError::InvalidSession(s.to_string()))
    }
}

/// The rows a session intends to delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDelete {
    pub location: Location,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteState {
    Idle,
    PendingDelete(PendingDelete),
}

/// Pending deletes by session. Sessions not in the table are idle.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmations {
    #[serde(default)]
    pending: BTreeMap<SessionId, PendingDelete>,
}

impl DeleteConfirmations {
    /// Load the table; a missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, ConfirmError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Replace the file in one rename, so a reader sees the old table or the
    /// new one.
    pub fn save(&self, path: &Path) -> Result<(), ConfirmError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(path)?;
        Ok(())
    }

    pub fn state(&self, session: SessionId) -> DeleteState {
        match self.pending.get(&session) {
            Some(target) => DeleteState::PendingDelete(*target),
            None => DeleteState::Idle,
        }
    }

    /// Open a new session holding `target` as its pending delete.
    pub fn mark(&mut self, target: PendingDelete) -> SessionId {
        let session = SessionId::new();
        self.pending.insert(session, target);
        session
    }

    /// Return the session to idle, handing back the delete to perform.
    pub fn confirm(&mut self, session: SessionId) -> Result<PendingDelete, ConfirmError> {
        self.pending
            .remove(&session)
            .ok_or(ConfirmError::NotPending(session))
    }

    /// Return the session to idle without deleting. Returns whether a delete
    /// was pending.
    pub fn cancel(&mut self, session: SessionId) -> bool {
        self.pending.remove(&session).is_some()
    }

    pub fn pending(&self) -> impl Iterator<Item = (SessionId, PendingDelete)> + '_ {
        self.pending.iter().map(|(s, t)| (*s, *t))
    }
}
