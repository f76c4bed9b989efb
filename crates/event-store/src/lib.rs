//! Append-only event log storage.
//!
//! Events are keyed by `(vin, version)`. Within one VIN, versions form a
//! contiguous, gapless, strictly increasing sequence; entries are never
//! mutated or deleted once written. Aggregate state is reconstructed by
//! reading a VIN's entries in ascending version order.

pub mod error;
pub mod event;
pub mod memory;
pub mod publish;
pub mod store;

pub use common::Vin;
pub use error::{EventStoreError, Result};
pub use event::{EventEnvelope, EventEnvelopeBuilder, EventId, Version};
pub use memory::InMemoryEventStore;
pub use publish::{EventPublisher, NullEventPublisher, RecordingEventPublisher};
pub use store::{AppendOptions, EventStore, EventStream};
