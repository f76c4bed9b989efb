//! Core aggregate and domain event traits.

use common::Vin;
use event_store::Version;

use crate::codec::EventCodec;

/// Trait for domain events.
///
/// Domain events are immutable facts named in past tense. Each variant
/// carries a stable type tag that identifies its decode path in the log for
/// the lifetime of the system; renaming a tag without a log migration breaks
/// replay.
pub trait DomainEvent: Send + Sync + Clone {
    /// Returns the stable type tag for this event.
    fn event_type(&self) -> &'static str;

    /// Serializes the event's data to a storable payload.
    ///
    /// The payload excludes the type tag; the tag is stored alongside it and
    /// drives decoding.
    fn payload(&self) -> serde_json::Result<serde_json::Value>;

    /// Returns the codec with a decoder registered for every variant.
    fn codec() -> EventCodec<Self>
    where
        Self: Sized;
}

/// Trait for event-sourced aggregates.
///
/// An aggregate is the unit of consistency the event log and concurrency
/// rules apply to (here, one truck identified by VIN). Aggregates are
/// rebuilt by replaying events; commands validate the current state and
/// return the events they would record, never mutating directly.
pub trait Aggregate: Default + Send + Sync + Sized {
    /// The type of events this aggregate records and replays.
    type Event: DomainEvent;

    /// The type of errors this aggregate's commands can produce.
    type Error: std::error::Error + Send + Sync;

    /// Returns the aggregate kind name used in stored envelopes.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's VIN, or None for an uninitialized aggregate.
    fn vin(&self) -> Option<&Vin>;

    /// Returns the version of the last event folded into this aggregate.
    fn version(&self) -> Version;

    /// Sets the aggregate version. Called by the repository during replay.
    fn set_version(&mut self, version: Version);

    /// Applies an event, updating state.
    ///
    /// Must be pure and deterministic: the same prior state and event always
    /// produce the same new state, with no side effects and no failure —
    /// events are facts that have already happened. Handlers may consult
    /// only the event's payload and the accumulated prior state.
    fn apply(&mut self, event: Self::Event);

    /// Applies multiple events in sequence.
    fn apply_events(&mut self, events: impl IntoIterator<Item = Self::Event>) {
        for event in events {
            self.apply(event);
        }
    }
}
