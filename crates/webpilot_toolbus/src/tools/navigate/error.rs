use thiserror::Error;

use crate::browser::BrowserError;

#[derive(Debug, Error)]
pub enum NavigateError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Navigation failed: {0}")]
    Browser(#[from] BrowserError),
}
