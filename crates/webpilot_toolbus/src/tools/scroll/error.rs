use thiserror::Error;

use crate::browser::BrowserError;

#[derive(Debug, Error)]
pub enum ScrollError {
    #[error("Scroll failed: {0}")]
    Browser(#[from] BrowserError),
}
