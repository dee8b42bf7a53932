//! Default knobs shared by the runtime, the effectors and the CLI.

pub const PROVIDER: &str = "anthropic";
pub const MODEL: &str = "claude-3-7-sonnet-20250219";
/// Smaller model used only for transcript summaries
pub const SUMMARY_MODEL: &str = "claude-3-5-haiku-20241022";
pub const MAX_TOKENS: u32 = 4096;

/// Input tokens above which summarization kicks in
pub const SUMMARY_TOKEN_THRESHOLD: u64 = 5000;
/// User/assistant pairs kept verbatim at the tail when summarizing
pub const KEEP_LAST_TURNS: usize = 2;

pub const SCROLL_AMOUNT: i64 = 500;
pub const SCREENSHOT_JPEG_QUALITY: i64 = 80;
/// Characters of write_file content echoed back in the resource reference
pub const RESOURCE_PREVIEW_CHARS: usize = 100;
/// Pause after actions that may trigger navigation or lazy loading
pub const SETTLE_DELAY_MS: u64 = 1000;

pub const VIEWPORT_WIDTH: u32 = 1280;
pub const VIEWPORT_HEIGHT: u32 = 800;

/// MCP protocol revision spoken by the effector host
pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
