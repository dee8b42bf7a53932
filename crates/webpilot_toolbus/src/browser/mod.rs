//! The single browser page the effectors act on.
//!
//! Effectors only see [`BrowserPage`]; [`ChromiumBrowser`] is the production
//! implementation over the Chrome DevTools Protocol.

mod chromium;
mod settings;

pub use chromium::{ChromiumBrowser, ChromiumPage};
pub use settings::BrowserSettings;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    Launch(String),

    #[error("Browser command failed: {0}")]
    Command(String),

    #[error("Browser is closed")]
    Closed,
}

#[async_trait]
pub trait BrowserPage: Send + Sync {
    /// Loads `url` and waits for the navigation to finish.
    async fn goto(&self, url: &str) -> Result<(), BrowserError>;

    async fn title(&self) -> Result<String, BrowserError>;

    async fn url(&self) -> Result<String, BrowserError>;

    /// Captures the viewport as JPEG at the given quality (0-100).
    async fn screenshot_jpeg(&self, quality: i64) -> Result<Vec<u8>, BrowserError>;

    async fn click(&self, x: f64, y: f64) -> Result<(), BrowserError>;

    /// Scrolls vertically by `dy` pixels; negative scrolls up.
    async fn scroll_by(&self, dy: i64) -> Result<(), BrowserError>;

    /// Types into whatever element has focus.
    async fn type_text(&self, text: &str) -> Result<(), BrowserError>;

    async fn press_enter(&self) -> Result<(), BrowserError>;
}

pub type SharedPage = Arc<dyn BrowserPage>;
