//! Main Runtime orchestrator for webpilot.
//!
//! The Runtime ties together the session, the model provider and the effector
//! host into one browsing loop.
//!
//! Split into focused submodules:
//! - **agent_loop**: run_session and the per-call compaction steps
//! - **llm**: one model call, streamed or not, folded into an assistant turn
//! - **tools**: effector dispatch, ambient page info and artifact recording

mod agent_loop;
mod llm;
mod tools;

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, warn};
use webpilot_core::{Session, SessionEvent, SessionId, TokenUsage};
use webpilot_llms::{AnthropicProvider, Provider, ProviderRegistry};
use webpilot_toolbus::{EffectorHost, ToolSpec};

use crate::config::RuntimeConfig;
use crate::error::RuntimeError;

/// Drives one browsing session.
pub struct Runtime {
    /// The current session state
    pub session: Session,
    /// LLM provider for generating responses
    pub llm_client: Arc<dyn Provider>,
    /// Where effectors run
    pub host: Arc<dyn EffectorHost>,
    /// Event channel for progress output
    pub event_tx: mpsc::Sender<SessionEvent>,
    /// Runtime configuration
    pub config: RuntimeConfig,
    /// Tool catalog, fetched once per runtime
    catalog: Vec<ToolSpec>,
    /// Usage reported by the most recent model call
    last_usage: Option<TokenUsage>,
}

impl Runtime {
    /// Create a new Runtime and fetch the host's tool catalog.
    pub async fn new(
        config: RuntimeConfig,
        session_id: SessionId,
        host: Arc<dyn EffectorHost>,
        llm_client: Arc<dyn Provider>,
        event_tx: mpsc::Sender<SessionEvent>,
    ) -> Result<Self, RuntimeError> {
        let catalog = host.catalog().await?;
        info!(
            session = %session_id,
            tools = catalog.len(),
            model = %config.model,
            "Runtime ready"
        );

        Ok(Self {
            session: Session::new(session_id),
            llm_client,
            host,
            event_tx,
            config,
            catalog,
            last_usage: None,
        })
    }

    /// Create an LLM provider based on configuration.
    pub fn create_provider(config: &RuntimeConfig) -> Result<Arc<dyn Provider>, RuntimeError> {
        let mut registry = ProviderRegistry::new();
        if config.provider == "anthropic" {
            let anthropic = AnthropicProvider::from_env()
                .map_err(|e| RuntimeError::ProviderNotFound(format!("Anthropic: {}", e)))?;
            registry = registry.register("anthropic", anthropic);
        }

        registry
            .get_provider(&config.provider)
            .map_err(|e| RuntimeError::ProviderNotFound(e.to_string()))
    }

    pub fn catalog(&self) -> &[ToolSpec] {
        &self.catalog
    }

    pub fn last_usage(&self) -> Option<&TokenUsage> {
        self.last_usage.as_ref()
    }

    /// Graceful shutdown: closes the host and its browser.
    pub async fn shutdown(&mut self) -> Result<(), RuntimeError> {
        info!("Shutting down runtime");

        if let Err(e) = self.host.shutdown().await {
            warn!(error = %e, "Effector host shutdown failed");
        }
        let _ = self
            .event_tx
            .send(SessionEvent::status("Session ended"))
            .await;

        Ok(())
    }
}
