//! `webpilot run`: one browsing session from prompt to final answer.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{info, warn};
use webpilot_constant::{app, prompts};
use webpilot_core::{SessionEvent, SessionId, SessionStatus};
use webpilot_runtime::{Runtime, RuntimeConfig};
use webpilot_toolbus::mcp::McpServersConfig;
use webpilot_toolbus::{
    BrowserSettings, EffectorHost, EffectorOptions, LocalHost, RemoteHost, TerminalPrompter,
};

use crate::commands::resolve_workdir;
use crate::output;

const EVENT_BUFFER: usize = 256;

pub struct RunArgs {
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub summary_model: Option<String>,
    pub workdir: Option<PathBuf>,
    pub max_turns: Option<u32>,
    pub max_tokens: Option<u32>,
    pub stream: bool,
    pub headed: bool,
    pub host_config: Option<PathBuf>,
    pub server: Option<String>,
    pub ask_timeout: Option<u64>,
    pub download: bool,
}

/// Environment first, then flags on top.
fn build_config(args: &RunArgs, workdir: PathBuf) -> RuntimeConfig {
    let mut config = RuntimeConfig::from_env(workdir);

    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(model) = &args.summary_model {
        config = config.with_summary_model(model);
    }
    if let Some(max) = args.max_turns {
        config = config.with_max_turns(max);
    }
    if let Some(max) = args.max_tokens {
        config = config.with_max_tokens(max);
    }
    if let Some(secs) = args.ask_timeout {
        config = config.with_ask_timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }
    if !args.stream {
        config = config.with_stream(false);
    }
    config.with_download_artifacts(args.download)
}

async fn connect_host(
    args: &RunArgs,
    config: &RuntimeConfig,
    session: &SessionId,
) -> Result<Arc<dyn EffectorHost>> {
    if let Some(path) = &args.host_config {
        let servers = McpServersConfig::load(path)?;
        let server = servers.select(args.server.as_deref())?;
        info!(server = %server.id, "Connecting to effector server");
        return Ok(Arc::new(RemoteHost::connect(server).await?));
    }

    let mut settings = BrowserSettings::from_env();
    if args.headed {
        settings = settings.with_headless(false);
    }
    let host = LocalHost::launch(
        config.workdir.clone(),
        session.clone(),
        &settings,
        Arc::new(TerminalPrompter::stdin()),
        EffectorOptions::default().with_ask_timeout(config.ask_timeout),
    )
    .await?;
    Ok(Arc::new(host))
}

pub async fn handle(args: RunArgs) -> Result<()> {
    let workdir = resolve_workdir(args.workdir.clone())?;
    let config = build_config(&args, workdir);
    let session = SessionId::new();

    let provider = Runtime::create_provider(&config)?;

    let spinner = output::spinner("Starting browser...");
    let host = match connect_host(&args, &config, &session).await {
        Ok(host) => {
            spinner.finish_and_clear();
            host
        }
        Err(e) => {
            output::spinner_error(&spinner, "Effector host unavailable");
            return Err(e);
        }
    };

    output::header(&format!("{} {}", app::DISPLAY_NAME, app::VERSION));
    output::kv("session", session.as_str());
    output::kv("model", &config.model);
    output::kv("workdir", &config.workdir.display().to_string());
    println!();

    let (event_tx, mut event_rx) = mpsc::channel::<SessionEvent>(EVENT_BUFFER);
    let renderer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            output::event(&event);
        }
    });

    let prompt = args
        .prompt
        .unwrap_or_else(|| prompts::INITIAL_PROMPT.to_string());

    let mut runtime = match Runtime::new(config, session, host.clone(), provider, event_tx).await {
        Ok(runtime) => runtime,
        Err(e) => {
            let _ = host.shutdown().await;
            return Err(e.into());
        }
    };

    let result = runtime.run_session(prompt).await;
    if let Err(e) = runtime.shutdown().await {
        warn!(error = %e, "Runtime shutdown failed");
    }

    let status = runtime.session.status.clone();
    let turns = runtime.session.transcript.len();
    let artifacts = runtime.session.artifacts.len();
    drop(runtime);
    let _ = renderer.await;

    result?;
    println!();
    output::kv("turns", &turns.to_string());
    output::kv("artifacts", &artifacts.to_string());

    match status {
        SessionStatus::Failed { error } => Err(anyhow::anyhow!("Session failed: {}", error)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RunArgs {
        RunArgs {
            prompt: None,
            model: Some("claude-test".to_string()),
            summary_model: None,
            workdir: None,
            max_turns: Some(4),
            max_tokens: None,
            stream: false,
            headed: false,
            host_config: None,
            server: None,
            ask_timeout: Some(0),
            download: false,
        }
    }

    #[test]
    fn test_flags_override_config() {
        let config = build_config(&args(), PathBuf::from("/work"));
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.max_turns, Some(4));
        assert!(!config.stream);
        assert!(!config.download_artifacts);
        assert_eq!(config.ask_timeout, None);
    }

    #[test]
    fn test_positive_ask_timeout_is_kept() {
        let mut a = args();
        a.ask_timeout = Some(15);
        let config = build_config(&a, PathBuf::from("/work"));
        assert_eq!(config.ask_timeout, Some(Duration::from_secs(15)));
    }
}
