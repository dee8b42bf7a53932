//! Context building and compaction for the Runtime.
//!
//! Split into focused submodules:
//! - **messages**: transcript-to-LLM message conversion and request building
//! - **compact**: media stripping after each tool round
//! - **summarize**: replacing the middle of a long transcript with a summary

mod compact;
mod messages;
mod summarize;

pub use compact::strip_media;
pub use messages::{
    build_generate_request, build_messages, stop_condition, token_usage, turn_from_response,
};
pub use summarize::{SummaryOutcome, summarize};
