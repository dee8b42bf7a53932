//! Runtime configuration for webpilot

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use webpilot_constant::{defaults, prompts};

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Model driving the browser
    pub model: String,
    /// Model used only for transcript summaries
    pub summary_model: String,
    /// Provider id in the registry
    pub provider: String,
    /// Maximum tokens for each model response
    pub max_tokens: u32,
    pub temperature: Option<f32>,
    pub system_prompt: String,
    /// Input tokens of the last call above which the transcript is summarized
    pub summary_threshold: u64,
    /// User/assistant pairs kept verbatim when summarizing
    pub keep_last_turns: usize,
    pub strip_media: bool,
    pub summarize: bool,
    /// Model calls per session (None = unlimited)
    pub max_turns: Option<u32>,
    /// Stream model output as text deltas
    pub stream: bool,
    /// None waits for the human forever
    pub ask_timeout: Option<Duration>,
    /// Root of the screenshot/, artefacts/ and downloads/ directories
    pub workdir: PathBuf,
    /// Fetch every recorded artifact into downloads/ when the session ends
    pub download_artifacts: bool,
}

impl RuntimeConfig {
    pub fn new(workdir: PathBuf) -> Self {
        Self {
            model: defaults::MODEL.to_string(),
            summary_model: defaults::SUMMARY_MODEL.to_string(),
            provider: defaults::PROVIDER.to_string(),
            max_tokens: defaults::MAX_TOKENS,
            temperature: None,
            system_prompt: prompts::SYSTEM_PROMPT.to_string(),
            summary_threshold: defaults::SUMMARY_TOKEN_THRESHOLD,
            keep_last_turns: defaults::KEEP_LAST_TURNS,
            strip_media: true,
            summarize: true,
            max_turns: None,
            stream: true,
            ask_timeout: None,
            workdir,
            download_artifacts: true,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_summary_model(mut self, model: impl Into<String>) -> Self {
        self.summary_model = model.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_summary_threshold(mut self, tokens: u64) -> Self {
        self.summary_threshold = tokens;
        self
    }

    /// At least one exchange is always kept after the summary.
    pub fn with_keep_last_turns(mut self, pairs: usize) -> Self {
        self.keep_last_turns = pairs.max(1);
        self
    }

    pub fn with_strip_media(mut self, enabled: bool) -> Self {
        self.strip_media = enabled;
        self
    }

    pub fn with_summarize(mut self, enabled: bool) -> Self {
        self.summarize = enabled;
        self
    }

    pub fn with_max_turns(mut self, max: u32) -> Self {
        self.max_turns = Some(max);
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_ask_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ask_timeout = timeout;
        self
    }

    pub fn with_download_artifacts(mut self, enabled: bool) -> Self {
        self.download_artifacts = enabled;
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Values that fail to parse keep their default.
    pub fn from_env(workdir: PathBuf) -> Self {
        let workdir = std::env::var("WEBPILOT_WORKDIR")
            .map(PathBuf::from)
            .unwrap_or(workdir);
        let mut config = Self::new(workdir);

        if let Ok(model) = std::env::var("WEBPILOT_MODEL") {
            config.model = model;
        }

        if let Ok(model) = std::env::var("WEBPILOT_SUMMARY_MODEL") {
            config.summary_model = model;
        }

        if let Ok(provider) = std::env::var("WEBPILOT_PROVIDER") {
            config.provider = provider.to_lowercase();
        }

        if let Some(val) = env_parse::<u32>("WEBPILOT_MAX_TOKENS") {
            config.max_tokens = val;
        }

        if let Some(val) = env_parse::<u64>("WEBPILOT_SUMMARY_THRESHOLD") {
            config.summary_threshold = val;
        }

        if let Some(val) = env_parse::<usize>("WEBPILOT_KEEP_LAST_TURNS").filter(|&v| v > 0) {
            config.keep_last_turns = val;
        }

        if let Some(val) = env_parse::<u32>("WEBPILOT_MAX_TURNS") {
            config.max_turns = Some(val);
        }

        if let Ok(val) = std::env::var("WEBPILOT_STREAM") {
            config.stream = parse_flag(&val).unwrap_or(config.stream);
        }

        if let Some(secs) = env_parse::<u64>("WEBPILOT_ASK_TIMEOUT_SECS") {
            config.ask_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        config
    }
}

fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
