use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

use crate::{EventEnvelope, EventStoreError, Result, Version};
use common::Vin;

/// Options for appending events to the store.
#[derive(Debug, Clone, Default)]
pub struct AppendOptions {
    /// Expected version of the truck's log tip for optimistic concurrency
    /// control. If None, only the duplicate-version check applies.
    pub expected_version: Option<Version>,
}

impl AppendOptions {
    /// Creates options with no expected-version check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options expecting the log tip to be at a specific version.
    pub fn expect_version(version: Version) -> Self {
        Self {
            expected_version: Some(version),
        }
    }

    /// Creates options expecting the truck to have no events yet.
    pub fn expect_new() -> Self {
        Self {
            expected_version: Some(Version::initial()),
        }
    }
}

/// A stream of events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<EventEnvelope>> + Send>>;

/// Core trait for event log store implementations.
///
/// All implementations must be thread-safe (Send + Sync) and must never
/// mutate or delete an entry once written.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Appends a batch of events for a single truck.
    ///
    /// The batch is all-or-nothing. The append fails with
    /// `ConcurrencyConflict` if `options.expected_version` is set and does
    /// not match the stored tip, or if the batch's first version is not the
    /// successor of the stored tip; in either case nothing is persisted.
    ///
    /// Returns the new tip version after appending.
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version>;

    /// Retrieves all events for a truck in ascending version order.
    ///
    /// An unknown VIN yields an empty vec, not an error.
    async fn events_for_aggregate(&self, vin: &Vin) -> Result<Vec<EventEnvelope>>;

    /// Retrieves every truck's events, grouped by VIN.
    ///
    /// Groups are ordered by VIN ascending and each group is internally
    /// version-ordered. Supports full-log replay for query rebuilding.
    async fn all_events_grouped(&self) -> Result<Vec<(Vin, Vec<EventEnvelope>)>>;

    /// Retrieves events by type tag, in insertion order.
    async fn events_by_type(&self, event_type: &str) -> Result<Vec<EventEnvelope>>;

    /// Gets the current tip version of a truck's log.
    ///
    /// Returns None if the truck has no events.
    async fn aggregate_version(&self, vin: &Vin) -> Result<Option<Version>>;

    /// Streams all events in the store in insertion order.
    async fn stream_all_events(&self) -> Result<EventStream>;
}

/// Validates a batch before appending: non-empty, single VIN, sequential
/// versions.
pub fn validate_events_for_append(events: &[EventEnvelope]) -> Result<()> {
    let first = events
        .first()
        .ok_or_else(|| EventStoreError::InvalidBatch("empty event batch".to_string()))?;

    for event in events.iter().skip(1) {
        if event.vin != first.vin {
            return Err(EventStoreError::InvalidBatch(
                "all events in a batch must share one VIN".to_string(),
            ));
        }
        if event.aggregate_type != first.aggregate_type {
            return Err(EventStoreError::InvalidBatch(
                "all events in a batch must share one aggregate type".to_string(),
            ));
        }
    }

    let mut expected_version = first.version;
    for event in events.iter().skip(1) {
        expected_version = expected_version.next();
        if event.version != expected_version {
            return Err(EventStoreError::InvalidBatch(format!(
                "event versions must be sequential: expected {}, got {}",
                expected_version, event.version
            )));
        }
    }

    Ok(())
}
