use serde::{Deserialize, Serialize};

use crate::session::SessionStatus;
use crate::tool_call::{ToolResult, ToolUse};
use crate::turn::{Role, StopCondition, TokenUsage};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    TurnStart { role: Role },

    TextDelta { text: String },

    ToolStart { tool_use: ToolUse },

    ToolDone {
        tool_use_id: String,
        result: ToolResult,
        duration_ms: u64,
    },

    Status { message: String },

    /// Compaction rewrote the transcript.
    Compacted { turns_before: usize, turns_after: usize },

    /// Summarization was attempted and abandoned; the transcript is unchanged.
    CompactionSkipped { reason: String },

    ArtifactRecorded { uri: String },

    ArtifactDownloaded { uri: String, path: String },

    TurnEnd {
        stop: StopCondition,
        #[serde(skip_serializing_if = "Option::is_none")]
        usage: Option<TokenUsage>,
    },

    Error { error: String },

    SessionEnd { status: SessionStatus },
}

impl SessionEvent {
    pub fn turn_start(role: Role) -> Self {
        SessionEvent::TurnStart { role }
    }

    pub fn text_delta(text: impl Into<String>) -> Self {
        SessionEvent::TextDelta { text: text.into() }
    }

    pub fn tool_start(tool_use: ToolUse) -> Self {
        SessionEvent::ToolStart { tool_use }
    }

    pub fn tool_done(tool_use_id: impl Into<String>, result: ToolResult, duration_ms: u64) -> Self {
        SessionEvent::ToolDone {
            tool_use_id: tool_use_id.into(),
            result,
            duration_ms,
        }
    }

    pub fn status(message: impl Into<String>) -> Self {
        SessionEvent::Status {
            message: message.into(),
        }
    }

    pub fn compacted(turns_before: usize, turns_after: usize) -> Self {
        SessionEvent::Compacted {
            turns_before,
            turns_after,
        }
    }

    pub fn compaction_skipped(reason: impl Into<String>) -> Self {
        SessionEvent::CompactionSkipped {
            reason: reason.into(),
        }
    }

    pub fn artifact_recorded(uri: impl Into<String>) -> Self {
        SessionEvent::ArtifactRecorded { uri: uri.into() }
    }

    pub fn artifact_downloaded(uri: impl Into<String>, path: impl Into<String>) -> Self {
        SessionEvent::ArtifactDownloaded {
            uri: uri.into(),
            path: path.into(),
        }
    }

    pub fn turn_end(stop: StopCondition, usage: Option<TokenUsage>) -> Self {
        SessionEvent::TurnEnd { stop, usage }
    }

    pub fn error(error: impl Into<String>) -> Self {
        SessionEvent::Error {
            error: error.into(),
        }
    }

    pub fn session_end(status: SessionStatus) -> Self {
        SessionEvent::SessionEnd { status }
    }
}
