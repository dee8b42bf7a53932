//! Application metadata constants

pub const NAME: &str = "webpilot";
pub const DISPLAY_NAME: &str = "webpilot";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "LLM tool-use loop that drives a web browser";

/// Per-user config directory, under the home directory
pub const CONFIG_DIR: &str = ".webpilot";
/// Env file loaded from CONFIG_DIR at startup
pub const ENV_FILE: &str = "env";

/// Screenshots, namespaced by session id
pub const SCREENSHOT_DIR: &str = "screenshot";
/// Files written by write_file, namespaced by session id
pub const ARTIFACTS_DIR: &str = "artefacts";
/// Retrieved artifacts, namespaced by the uri host segment
pub const DOWNLOADS_DIR: &str = "downloads";
