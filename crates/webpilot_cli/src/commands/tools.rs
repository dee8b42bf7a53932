//! `webpilot tools` subcommands.
//!
//! `list` and `info` only need the catalog, so they build the bus over a
//! detached page and never start a browser. `call` launches one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use webpilot_core::SessionId;
use webpilot_toolbus::{
    BrowserError, BrowserPage, BrowserSettings, EffectorHost, EffectorOptions, LocalHost,
    SessionLayout, TerminalPrompter, ToolBus, ToolContent,
};

use crate::cli::ToolsAction;
use crate::commands::resolve_workdir;
use crate::output;

pub async fn handle(action: ToolsAction) -> Result<()> {
    match action {
        ToolsAction::List => list(&catalog_bus()),
        ToolsAction::Info { tool } => info(&catalog_bus(), &tool),
        ToolsAction::Call {
            tool,
            args,
            headed,
            workdir,
        } => call(&tool, &args, headed, resolve_workdir(workdir)?).await,
    }
}

/// A page with no browser behind it. Every command fails with `Closed`.
struct DetachedPage;

#[async_trait]
impl BrowserPage for DetachedPage {
    async fn goto(&self, _url: &str) -> Result<(), BrowserError> {
        Err(BrowserError::Closed)
    }

    async fn title(&self) -> Result<String, BrowserError> {
        Err(BrowserError::Closed)
    }

    async fn url(&self) -> Result<String, BrowserError> {
        Err(BrowserError::Closed)
    }

    async fn screenshot_jpeg(&self, _quality: i64) -> Result<Vec<u8>, BrowserError> {
        Err(BrowserError::Closed)
    }

    async fn click(&self, _x: f64, _y: f64) -> Result<(), BrowserError> {
        Err(BrowserError::Closed)
    }

    async fn scroll_by(&self, _dy: i64) -> Result<(), BrowserError> {
        Err(BrowserError::Closed)
    }

    async fn type_text(&self, _text: &str) -> Result<(), BrowserError> {
        Err(BrowserError::Closed)
    }

    async fn press_enter(&self) -> Result<(), BrowserError> {
        Err(BrowserError::Closed)
    }
}

fn catalog_bus() -> ToolBus {
    ToolBus::new(
        SessionLayout::new(PathBuf::new(), SessionId::new()),
        Arc::new(DetachedPage),
        Arc::new(TerminalPrompter::stdin()),
    )
}

fn list(bus: &ToolBus) -> Result<()> {
    let tools = bus.list_tools();

    if tools.is_empty() {
        output::dim("No tools registered");
        return Ok(());
    }

    output::header("Browser Effectors");

    let mut table = output::table();
    output::table_header(&mut table, "Tool", "Description");

    let items: Vec<_> = tools
        .iter()
        .map(|t| {
            output::table_row(&mut table, &t.name, &t.description);
            (t.name.as_str(), t.description.as_str())
        })
        .collect();

    output::table_print(&table, &items);

    Ok(())
}

fn info(bus: &ToolBus, tool_name: &str) -> Result<()> {
    let tools = bus.list_tools();
    let tool = tools
        .iter()
        .find(|t| t.name == tool_name)
        .ok_or_else(|| anyhow!("Tool not found: {}", tool_name))?;

    output::header(&format!("Tool: {}", tool.name));
    output::dim(&tool.description);
    println!();
    output::header("Parameters");
    output::json_pretty(&tool.input_schema);

    Ok(())
}

async fn call(tool_name: &str, args_str: &str, headed: bool, workdir: PathBuf) -> Result<()> {
    let args: JsonValue =
        serde_json::from_str(args_str).map_err(|e| anyhow!("Invalid JSON arguments: {}", e))?;

    let spinner = output::spinner("Launching browser...");
    let mut settings = BrowserSettings::from_env();
    if headed {
        settings = settings.with_headless(false);
    }
    let host = match LocalHost::launch(
        workdir,
        SessionId::new(),
        &settings,
        Arc::new(TerminalPrompter::stdin()),
        EffectorOptions::default(),
    )
    .await
    {
        Ok(host) => host,
        Err(e) => {
            output::spinner_error(&spinner, "Browser failed to start");
            return Err(e.into());
        }
    };

    spinner.set_message(format!("Calling {}...", tool_name));
    let started = std::time::Instant::now();
    let result = host.invoke(tool_name, args).await;
    let duration_ms = started.elapsed().as_millis();

    let outcome = match result {
        Ok(contents) => {
            output::spinner_success(&spinner, &format!("Completed in {}ms", duration_ms));
            println!();
            for content in &contents {
                print_content(content);
            }
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, &format!("Failed after {}ms", duration_ms));
            Err(e.into())
        }
    };

    host.shutdown().await?;
    outcome
}

fn print_content(content: &ToolContent) {
    match content {
        ToolContent::Text { text } => output::text("text", text),
        ToolContent::Json { json } => output::json_pretty(json),
        ToolContent::Image { image } => {
            output::kv("image", &format!("{} bytes", image.bytes.len()))
        }
        ToolContent::Resource { resource } => output::data("resource", resource),
    }
}
