use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactTracker;
use crate::transcript::Transcript;
use crate::turn::Turn;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionStatus {
    Running,
    Completed,
    Failed { error: String },
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::Running
    }
}

/// State owned by the driver for one run: the transcript and the artifacts
/// effectors produced along the way.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub status: SessionStatus,
    pub transcript: Transcript,
    pub artifacts: ArtifactTracker,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            status: SessionStatus::default(),
            transcript: Transcript::new(),
            artifacts: ArtifactTracker::new(),
            started_at: Utc::now(),
        }
    }

    pub fn add_turn(&mut self, turn: Turn) {
        self.transcript.push(turn);
    }

    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.status, SessionStatus::Running)
    }

    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = SessionStatus::Failed {
            error: error.into(),
        };
    }
}
