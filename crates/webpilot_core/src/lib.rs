pub mod artifact;
pub mod error;
pub mod event;
pub mod session;
pub mod tool_call;
pub mod transcript;
pub mod turn;

pub use artifact::{
    mime_type_for, ArtifactRecord, ArtifactTracker, ArtifactUri, ARTIFACT_LIST_URI, ARTIFACT_SCHEME,
};
pub use error::{CoreError, Result};
pub use event::SessionEvent;
pub use session::{Session, SessionId, SessionStatus};
pub use tool_call::{ToolResult, ToolResultContent, ToolUse};
pub use transcript::Transcript;
pub use turn::{
    ContentItem, ImageData, ImageFormat, ResourceRef, Role, StopCondition, TokenUsage, Turn,
};
