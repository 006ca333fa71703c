use crate::config::ConfigError;
use crate::service::PortalError;
use crate::telemetry::TelemetryError;

/// Process-level failures surfaced from startup, the server loop, and the CLI demo.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("portal error: {0}")]
    Portal(#[from] PortalError),
}
