pub mod artifacts;
pub mod config;
pub mod context;
pub mod error;
pub mod runtime;

pub use artifacts::{DownloadedArtifact, download_artifacts};
pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use runtime::Runtime;
