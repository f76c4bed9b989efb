use thiserror::Error;

use crate::Version;
use common::Vin;

/// Errors that can occur when interacting with the event store.
#[derive(Debug, Error)]
pub enum EventStoreError {
    /// A concurrency conflict occurred when appending events.
    ///
    /// Raised both when a caller-supplied expected version does not match
    /// the stored tip and when an appended version would collide with an
    /// existing `(vin, version)` entry. The log is left unchanged.
    #[error("Concurrency conflict for truck {vin}: expected version {expected}, found {actual}")]
    ConcurrencyConflict {
        vin: Vin,
        expected: Version,
        actual: Version,
    },

    /// The event batch was malformed (empty, mixed VINs, or gapped versions).
    #[error("Invalid event batch: {0}")]
    InvalidBatch(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, EventStoreError>;
