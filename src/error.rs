//! Crate-level error type.
//!
//! Only configuration problems and failures of external collaborators are
//! errors. Skipped ticks, lost subjects and missed clicks are ordinary values.

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("detector failed: {0}")]
    Detector(#[source] BoxError),

    #[error("render sink failed: {0}")]
    Render(#[source] BoxError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
