use std::path::PathBuf;

use thiserror::Error;

use crate::{copy::CopyId, events::CopyEvent, tracking_state::TrackingState};

/// Errors raised by catalog records and catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A record was constructed with values that break its contract
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
    /// The copy's tracking state does not allow the requested event
    #[error("cannot process {event:?} for copy {copy} from state {state:?}")]
    InvalidState {
        /// The copy the event was addressed to
        copy: CopyId,
        /// The refused event
        event: CopyEvent,
        /// Where the catalog currently tracks the copy, `None` if it does not
        state: Option<TrackingState>,
    },
}

impl CatalogError {
    /// Shorthand for an [`CatalogError::InvariantViolation`]
    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InvariantViolation(reason.into())
    }
}

/// Errors raised while loading a [`crate::config::CatalogConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Path that was being read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The configuration text is not valid JSON for the schema
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result alias defaulting to [`CatalogError`]
pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
