//! Effector host process configuration.
//!
//! ```toml
//! [[servers]]
//! id = "browser"
//! name = "Browser effectors"
//! command = "webpilot"
//! args = ["serve"]
//! env = { WEBPILOT_HEADLESS = "false", ANTHROPIC_API_KEY = "$ANTHROPIC_API_KEY" }
//! ```
//!
//! Env values starting with `$` are read from the caller's environment when the
//! process is spawned; `$NAME` inside a longer value is substituted in place.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize configuration to TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("No server configured with id '{0}'")]
    ServerNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerConfig {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// Executable name or path, resolved through PATH.
    pub command: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub env: HashMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,
}

impl McpServerConfig {
    pub fn new(id: impl Into<String>, command: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            command: command.into(),
            args: Vec::new(),
            env: HashMap::new(),
            working_dir: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// The process environment with `$VAR` references expanded.
    pub fn resolved_env(&self) -> Result<HashMap<String, String>, ConfigError> {
        self.env
            .iter()
            .map(|(key, value)| Ok((key.clone(), resolve_value(value)?)))
            .collect()
    }
}

fn resolve_value(value: &str) -> Result<String, ConfigError> {
    if let Some(var_name) = value.strip_prefix('$')
        && !var_name.is_empty()
        && var_name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return env::var(var_name).map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()));
    }

    let mut result = value.to_string();
    if result.contains('$') {
        for (key, var) in env::vars() {
            result = result.replace(&format!("${}", key), &var);
        }
    }
    Ok(result)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct McpServersConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<McpServerConfig>,
}

impl McpServersConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn add_server(&mut self, config: McpServerConfig) -> &mut Self {
        self.servers.push(config);
        self
    }

    pub fn find_server(&self, id: &str) -> Option<&McpServerConfig> {
        self.servers.iter().find(|s| s.id == id)
    }

    /// The server named by `id`, or the first one when `id` is `None`.
    pub fn select(&self, id: Option<&str>) -> Result<&McpServerConfig, ConfigError> {
        match id {
            Some(id) => self
                .find_server(id)
                .ok_or_else(|| ConfigError::ServerNotFound(id.to_string())),
            None => self
                .servers
                .first()
                .ok_or_else(|| ConfigError::ServerNotFound("<default>".to_string())),
        }
    }
}
