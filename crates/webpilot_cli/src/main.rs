//! CLI entry point for webpilot.

mod cli;
mod commands;
mod output;

use std::path::Path;

use clap::Parser;
use webpilot_constant::{app, prompts};
use webpilot_observability::{LogTarget, ObservabilityConfig};
use webpilot_runtime::RuntimeError;
use webpilot_toolbus::HostError;

use crate::cli::Cli;

/// Load env files: ~/.webpilot/env, then the nearest .env from the cwd up.
/// Variables already set in the process win over both.
fn load_webpilot_config() {
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(app::CONFIG_DIR).join(app::ENV_FILE);
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        let mut dir: &Path = &cwd;
        for _ in 0..32 {
            let env_file = dir.join(".env");
            if env_file.exists() {
                let _ = dotenvy::from_path(&env_file);
                break;
            }
            match dir.parent() {
                Some(parent) => dir = parent,
                None => break,
            }
        }
    }
}

/// Logs go to stderr: stdout carries the conversation, JSON output or MCP frames.
fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_log_target(LogTarget::Stderr);
    if config.log_level.is_none() {
        config = config.with_log_level(if verbose { "info" } else { "warn" });
    }
    if let Err(e) = webpilot_observability::init(config) {
        output::warning(&format!("Logging disabled: {}", e));
    }
}

fn needs_operator_hint(err: &anyhow::Error) -> bool {
    if let Some(e) = err.downcast_ref::<RuntimeError>() {
        return e.is_connectivity();
    }
    err.downcast_ref::<HostError>().is_some_and(HostError::is_fatal)
}

#[tokio::main]
async fn main() {
    load_webpilot_config();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    let result = commands::handle(cli).await;
    webpilot_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        if needs_operator_hint(&e) {
            output::hint(prompts::OPERATOR_HINT);
        }
        std::process::exit(1);
    }
}
