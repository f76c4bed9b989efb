//! Event-sourced repository: load by replay, save by append-then-publish.

use std::marker::PhantomData;

use common::Vin;
use event_store::{AppendOptions, EventEnvelope, EventPublisher, EventStore, Version};

use crate::aggregate::{Aggregate, DomainEvent};
use crate::codec::EventCodec;
use crate::error::DomainError;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult<A: Aggregate> {
    /// The aggregate after applying the newly recorded events.
    pub aggregate: A,

    /// The events that were recorded and published, in generation order.
    pub events: Vec<A::Event>,

    /// The aggregate's log tip after the command.
    pub new_version: Version,
}

/// Repository for event-sourced aggregates.
///
/// Loading replays a truck's ordered event log through the codec into
/// aggregate state. Saving assigns contiguous versions continuing from the
/// stored tip, appends the batch atomically under an expected-version check,
/// and publishes each envelope — in generation order — only after the append
/// succeeded. A conflicting concurrent save surfaces as
/// `EventStoreError::ConcurrencyConflict`; the caller may retry the whole
/// load-mutate-save cycle against fresh state.
pub struct EventSourcedRepository<S, P, A>
where
    S: EventStore,
    P: EventPublisher,
    A: Aggregate,
{
    store: S,
    publisher: P,
    codec: EventCodec<A::Event>,
    _phantom: PhantomData<A>,
}

impl<S, P, A> EventSourcedRepository<S, P, A>
where
    S: EventStore,
    P: EventPublisher,
    A: Aggregate,
{
    /// Creates a repository over the given store and publication sink.
    pub fn new(store: S, publisher: P) -> Self {
        Self {
            store,
            publisher,
            codec: A::Event::codec(),
            _phantom: PhantomData,
        }
    }

    /// Returns a reference to the underlying event store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads an aggregate by replaying its log.
    ///
    /// A truck with no events yields a default (uninitialized) aggregate.
    pub async fn load(&self, vin: &Vin) -> Result<A, DomainError> {
        let entries = self.store.events_for_aggregate(vin).await?;
        self.fold(entries)
    }

    /// Loads an aggregate, returning None if the truck has no events.
    ///
    /// Absence is a valid outcome, not an error; callers decide whether a
    /// missing truck is exceptional.
    pub async fn find_one(&self, vin: &Vin) -> Result<Option<A>, DomainError> {
        let entries = self.store.events_for_aggregate(vin).await?;
        if entries.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.fold(entries)?))
    }

    /// Loads every aggregate, ordered by VIN ascending.
    ///
    /// Each truck's log folds independently.
    pub async fn find_all(&self) -> Result<Vec<A>, DomainError> {
        let groups = self.store.all_events_grouped().await?;
        groups
            .into_iter()
            .map(|(_, entries)| self.fold(entries))
            .collect()
    }

    /// Executes a command against the aggregate's current state and persists
    /// the resulting events.
    ///
    /// The command function receives the replayed aggregate and returns the
    /// events to record, or a domain error. Empty event lists short-circuit
    /// without touching the store.
    pub async fn execute<F>(&self, vin: &Vin, command_fn: F) -> Result<CommandResult<A>, DomainError>
    where
        F: FnOnce(&A) -> Result<Vec<A::Event>, A::Error>,
        DomainError: From<A::Error>,
    {
        let aggregate = self.load(vin).await?;
        self.save(vin, aggregate, command_fn).await
    }

    /// Like [`execute`](Self::execute), but fails with `TruckNotFound` when
    /// the truck has no events yet.
    pub async fn execute_existing<F>(
        &self,
        vin: &Vin,
        command_fn: F,
    ) -> Result<CommandResult<A>, DomainError>
    where
        F: FnOnce(&A) -> Result<Vec<A::Event>, A::Error>,
        DomainError: From<A::Error>,
    {
        let aggregate = self.load(vin).await?;
        if aggregate.vin().is_none() {
            return Err(DomainError::TruckNotFound { vin: vin.clone() });
        }
        self.save(vin, aggregate, command_fn).await
    }

    async fn save<F>(
        &self,
        vin: &Vin,
        mut aggregate: A,
        command_fn: F,
    ) -> Result<CommandResult<A>, DomainError>
    where
        F: FnOnce(&A) -> Result<Vec<A::Event>, A::Error>,
        DomainError: From<A::Error>,
    {
        let tip = aggregate.version();

        let events = command_fn(&aggregate)?;

        if events.is_empty() {
            return Ok(CommandResult {
                aggregate,
                events: vec![],
                new_version: tip,
            });
        }

        let envelopes = self.build_envelopes(vin, tip, &events)?;

        // Append atomically, conditional on the tip we replayed from. A
        // racing writer surfaces as ConcurrencyConflict and nothing below
        // this point runs for the failed batch.
        let new_version = self
            .store
            .append(envelopes.clone(), AppendOptions::expect_version(tip))
            .await?;

        metrics::counter!("repository_events_appended").increment(envelopes.len() as u64);

        for envelope in &envelopes {
            self.publisher.publish(envelope).await;
        }

        for event in &events {
            aggregate.apply(event.clone());
        }
        aggregate.set_version(new_version);

        Ok(CommandResult {
            aggregate,
            events,
            new_version,
        })
    }

    fn fold(&self, entries: Vec<EventEnvelope>) -> Result<A, DomainError> {
        let mut aggregate = A::default();
        for envelope in entries {
            let event = self.codec.decode(&envelope.event_type, envelope.payload)?;
            aggregate.apply(event);
            aggregate.set_version(envelope.version);
        }
        Ok(aggregate)
    }

    fn build_envelopes(
        &self,
        vin: &Vin,
        tip: Version,
        events: &[A::Event],
    ) -> Result<Vec<EventEnvelope>, DomainError> {
        let mut envelopes = Vec::with_capacity(events.len());
        let mut version = tip;

        for event in events {
            version = version.next();
            let (tag, payload) = self.codec.encode(event)?;
            let envelope = EventEnvelope::builder()
                .vin(vin.clone())
                .aggregate_type(A::aggregate_type())
                .event_type(tag)
                .version(version)
                .payload(payload)
                .build();
            envelopes.push(envelope);
        }

        Ok(envelopes)
    }
}
