use thiserror::Error;

use crate::artifacts::ArtifactError;

#[derive(Debug, Error)]
pub enum WriteFileError {
    #[error("Failed to write artifact: {0}")]
    Artifact(#[from] ArtifactError),
}
