use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AskUserError {
    #[error("No answer within {0:?}")]
    TimedOut(Duration),

    #[error("Prompt failed: {0}")]
    Prompt(#[source] anyhow::Error),
}
