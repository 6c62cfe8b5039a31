//! Error types
//!
//! The simulation itself has no fatal errors: pool exhaustion is reported as a
//! value so callers can drop the spawn. Settings loading is the only fallible
//! outer surface.

use std::path::PathBuf;

use thiserror::Error;

/// No inactive slot was available in a fixed-capacity pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pool exhausted: all {capacity} slots are active")]
pub struct PoolExhausted {
    pub capacity: usize,
}

/// Settings loading/validation errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
