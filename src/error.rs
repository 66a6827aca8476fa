//! Error types surfaced to the session driver.

use std::path::PathBuf;

/// Errors returned by sequence generation, session setup and delta persistence.
///
/// Invariant violations inside the core (an out-of-range condition code, an
/// out-of-order staircase update) are defects and panic instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown session type, malformed ids, or inconsistent parameters.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A follow-up testing session was requested before the subject completed
    /// the adaptive testing session (session id 0).
    #[error(
        "no stored staircase value for subject {subject_id}; \
         adaptive testing must start with session id 0"
    )]
    MissingStaircaseState {
        /// Subject whose staircase value is missing.
        subject_id: u64,
    },

    /// Reading or writing a stored staircase value failed.
    #[error("delta store failure at {}: {source}", .path.display())]
    Store {
        /// File the store was accessing.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: StoreError,
    },
}

/// Low-level cause of a [`Error::Store`] failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The stored document could not be encoded or decoded.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a [`Error::Configuration`] with a formatted message.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
