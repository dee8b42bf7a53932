//! Shared constants for webpilot.

pub mod app;
pub mod defaults;
pub mod prompts;
