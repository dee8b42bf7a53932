use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};
use webpilot_core::SessionId;

use super::{EffectorHost, HostError};
use crate::artifacts::{ArtifactContents, ArtifactError, ArtifactStore};
use crate::browser::{BrowserSettings, ChromiumBrowser};
use crate::prompt::Prompter;
use crate::tools::{EffectorOptions, ToolOutput};
use crate::workspace::SessionLayout;
use crate::{ToolBus, ToolBusError, ToolSpec};

/// Effectors executed in this process.
pub struct LocalHost {
    bus: Arc<ToolBus>,
    store: ArtifactStore,
    browser: Option<ChromiumBrowser>,
}

impl LocalHost {
    pub fn new(bus: Arc<ToolBus>) -> Self {
        let store = ArtifactStore::new(bus.layout().clone());
        Self {
            bus,
            store,
            browser: None,
        }
    }

    /// Launches Chromium and registers the default effectors against its page.
    pub async fn launch(
        root: impl Into<PathBuf>,
        session: SessionId,
        settings: &BrowserSettings,
        prompter: Arc<dyn Prompter>,
        options: EffectorOptions,
    ) -> Result<Self, HostError> {
        let browser = ChromiumBrowser::launch(settings)
            .await
            .map_err(|e| HostError::Transport(e.to_string()))?;

        let layout = SessionLayout::new(root, session);
        let bus = ToolBus::with_options(layout, browser.page(), prompter, options);

        let mut host = Self::new(Arc::new(bus));
        host.browser = Some(browser);
        Ok(host)
    }

    pub fn bus(&self) -> &Arc<ToolBus> {
        &self.bus
    }
}

#[async_trait]
impl EffectorHost for LocalHost {
    async fn catalog(&self) -> Result<Vec<ToolSpec>, HostError> {
        Ok(self.bus.list_tools())
    }

    async fn invoke(&self, name: &str, args: JsonValue) -> Result<ToolOutput, HostError> {
        match self.bus.call(name, args).await {
            Ok((output, duration_ms)) => {
                debug!(tool = name, duration_ms, "Effector finished");
                Ok(output)
            }
            Err(ToolBusError::NotFound(tool)) => Err(HostError::UnknownTool(tool)),
            Err(ToolBusError::Failed { tool, source }) => Err(HostError::ToolFailed {
                tool,
                message: format!("{:#}", source),
            }),
        }
    }

    async fn read_artifact(&self, uri: &str) -> Result<ArtifactContents, HostError> {
        self.store.read(uri).await.map_err(|e| match e {
            ArtifactError::NotFound(name) => HostError::Artifact(format!("Artifact not found: {}", name)),
            other => HostError::Artifact(other.to_string()),
        })
    }

    async fn shutdown(&self) -> Result<(), HostError> {
        if let Some(browser) = &self.browser
            && let Err(e) = browser.close().await
        {
            warn!(error = %e, "Failed to close browser");
        }
        Ok(())
    }
}
