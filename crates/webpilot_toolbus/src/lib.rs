pub mod artifacts;
pub mod browser;
pub mod host;
pub mod mcp;
pub mod prompt;
pub mod tools;
pub mod workspace;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

pub use artifacts::{ArtifactContents, ArtifactError, ArtifactStore};
pub use browser::{BrowserError, BrowserPage, BrowserSettings, ChromiumBrowser, SharedPage};
pub use host::{EffectorHost, HostError, LocalHost, RemoteHost};
pub use prompt::{PromptInput, Prompter, TerminalPrompter};
pub use tools::{
    AskUser, AskUserArgs, AskUserError, Click, ClickArgs, ClickError, EffectorOptions, GetPageInfo,
    Navigate, NavigateArgs, NavigateError, Screenshot, ScreenshotError, Scroll, ScrollArgs,
    ScrollDirection, ScrollError, Tool, ToolContent, ToolOutput, ToolResult, TypeText, TypeTextArgs,
    WriteFile, WriteFileArgs, WriteFileError,
};
pub use workspace::SessionLayout;

#[derive(Debug, Error)]
pub enum ToolBusError {
    /// The name is not in the catalog; a configuration problem, not a tool failure.
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("{tool} failed: {source}")]
    Failed {
        tool: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Name-keyed table of effectors. Registration order is the catalog order.
pub struct ToolBus {
    layout: SessionLayout,
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolBus {
    /// A bus with the eight browser effectors registered.
    pub fn new(layout: SessionLayout, page: SharedPage, prompter: Arc<dyn Prompter>) -> Self {
        Self::with_options(layout, page, prompter, EffectorOptions::default())
    }

    pub fn with_options(
        layout: SessionLayout,
        page: SharedPage,
        prompter: Arc<dyn Prompter>,
        options: EffectorOptions,
    ) -> Self {
        let mut bus = Self::empty(layout);
        bus.register_defaults(page, prompter, options);
        bus
    }

    pub fn empty(layout: SessionLayout) -> Self {
        Self {
            layout,
            tools: HashMap::new(),
            order: Vec::new(),
        }
    }

    fn register_defaults(
        &mut self,
        page: SharedPage,
        prompter: Arc<dyn Prompter>,
        options: EffectorOptions,
    ) {
        let navigate = Navigate::new(Arc::clone(&page)).with_settle_delay(options.settle_delay);
        self.register(navigate);

        let screenshot = Screenshot::new(Arc::clone(&page), self.layout.clone())
            .with_quality(options.jpeg_quality);
        self.register(screenshot);

        let click = Click::new(Arc::clone(&page)).with_settle_delay(options.settle_delay);
        self.register(click);

        let scroll = Scroll::new(Arc::clone(&page)).with_settle_delay(options.settle_delay);
        self.register(scroll);

        let type_text = TypeText::new(Arc::clone(&page));
        self.register(type_text);

        let ask_user = AskUser::new(prompter).with_timeout(options.ask_timeout);
        self.register(ask_user);

        let write_file = WriteFile::new(ArtifactStore::new(self.layout.clone()));
        self.register(write_file);

        let page_info = GetPageInfo::new(page);
        self.register(page_info);
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), Arc::new(tool)).is_none() {
            self.order.push(name);
        }
    }

    pub fn contains(&self, tool_name: &str) -> bool {
        self.tools.contains_key(tool_name)
    }

    pub async fn call(
        &self,
        tool_name: &str,
        args: JsonValue,
    ) -> Result<(ToolOutput, u64), ToolBusError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolBusError::NotFound(tool_name.to_string()))?;

        let start = Instant::now();
        let output = tool
            .execute(args)
            .await
            .map_err(|source| ToolBusError::Failed {
                tool: tool_name.to_string(),
                source,
            })?;
        let duration_ms = start.elapsed().as_millis() as u64;

        Ok((output, duration_ms))
    }

    pub fn list_tools(&self) -> Vec<ToolSpec> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| ToolSpec {
                name: t.name().to_string(),
                description: t.description().to_string(),
                input_schema: t.parameters_schema(),
            })
            .collect()
    }

    pub fn layout(&self) -> &SessionLayout {
        &self.layout
    }
}

/// Catalog entry handed to the model: name, description and JSON schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input_schema: JsonValue,
}
