use thiserror::Error;

use crate::browser::BrowserError;

#[derive(Debug, Error)]
pub enum ScreenshotError {
    #[error("Capture failed: {0}")]
    Capture(#[from] BrowserError),

    #[error("Failed to save screenshot: {0}")]
    Save(#[from] std::io::Error),
}
