//! `webpilot serve`: the effector host as an MCP server on stdio.
//!
//! stdout carries protocol frames only, so `ask_user` questions go to the
//! controlling terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use webpilot_core::SessionId;
use webpilot_runtime::RuntimeConfig;
use webpilot_toolbus::mcp::McpServer;
use webpilot_toolbus::{
    BrowserSettings, ChromiumBrowser, EffectorOptions, SessionLayout, TerminalPrompter, ToolBus,
};

use crate::commands::resolve_workdir;

pub async fn handle(workdir: Option<PathBuf>, session: Option<String>, headed: bool) -> Result<()> {
    let workdir = resolve_workdir(workdir)?;
    let session = session.map(SessionId::from).unwrap_or_default();
    let ask_timeout = RuntimeConfig::from_env(workdir.clone()).ask_timeout;

    let mut settings = BrowserSettings::from_env();
    if headed {
        settings = settings.with_headless(false);
    }
    let browser = ChromiumBrowser::launch(&settings).await?;

    info!(session = %session, workdir = %workdir.display(), "Serving effectors over stdio");
    let bus = ToolBus::with_options(
        SessionLayout::new(workdir, session),
        browser.page(),
        Arc::new(TerminalPrompter::tty()),
        EffectorOptions::default().with_ask_timeout(ask_timeout),
    );

    let server = McpServer::new(Arc::new(bus));
    let served = server.serve(tokio::io::stdin(), tokio::io::stdout()).await;

    if let Err(e) = browser.close().await {
        warn!(error = %e, "Failed to close browser");
    }
    served?;
    Ok(())
}
