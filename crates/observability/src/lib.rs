//! Tracing setup for webpilot: console logging plus optional OTLP export.
//!
//! ```no_run
//! use webpilot_observability::{init, LogTarget, ObservabilityConfig};
//!
//! # fn main() -> Result<(), webpilot_observability::ObservabilityError> {
//! let config = ObservabilityConfig::new("webpilot")
//!     .with_log_level("info")
//!     .with_log_target(LogTarget::Stderr);
//! init(config)?;
//!
//! tracing::info!("Service started");
//! # Ok(())
//! # }
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::{LogTarget, ObservabilityConfig};
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use crate::tracing::{record_duration, record_error};

// session_span! and tool_span! are exported at the crate root via #[macro_export].
