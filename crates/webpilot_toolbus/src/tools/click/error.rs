use thiserror::Error;

use crate::browser::BrowserError;

#[derive(Debug, Error)]
pub enum ClickError {
    #[error("Coordinates must be finite and non-negative: ({x}, {y})")]
    InvalidCoordinates { x: f64, y: f64 },

    #[error("Click failed: {0}")]
    Browser(#[from] BrowserError),
}
