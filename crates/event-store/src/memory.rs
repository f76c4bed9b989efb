use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    EventEnvelope, EventStoreError, Result, Version,
    store::{AppendOptions, EventStore, EventStream, validate_events_for_append},
};
use common::Vin;

#[derive(Default)]
struct Inner {
    /// Per-truck logs. BTreeMap keeps grouped reads VIN-ascending.
    streams: BTreeMap<Vin, Vec<EventEnvelope>>,

    /// Every event in arrival order, for full-log streaming.
    arrival_log: Vec<EventEnvelope>,
}

/// In-memory event log store.
///
/// Backs tests and single-process deployments; implements the same
/// contract a durable store would. The write lock is held across the
/// tip-read/insert sequence, so appends for one VIN are serialized and the
/// contiguous-version invariant cannot be violated by racing writers.
#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryEventStore {
    /// Creates a new empty in-memory event store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of events stored.
    pub async fn event_count(&self) -> usize {
        self.inner.read().await.arrival_log.len()
    }

    /// Clears all events.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.streams.clear();
        inner.arrival_log.clear();
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, events: Vec<EventEnvelope>, options: AppendOptions) -> Result<Version> {
        validate_events_for_append(&events)?;

        let first = &events[0];
        let vin = first.vin.clone();

        let mut inner = self.inner.write().await;

        let tip = inner
            .streams
            .get(&vin)
            .and_then(|log| log.last())
            .map(|e| e.version)
            .unwrap_or(Version::initial());

        if let Some(expected) = options.expected_version
            && tip != expected
        {
            return Err(EventStoreError::ConcurrencyConflict {
                vin,
                expected,
                actual: tip,
            });
        }

        // Conditional insert: the batch must continue exactly where the log
        // ends, otherwise a racing writer got there first.
        if first.version != tip.next() {
            return Err(EventStoreError::ConcurrencyConflict {
                vin,
                expected: first.version,
                actual: tip,
            });
        }

        let last_version = events.last().map(|e| e.version).unwrap_or(tip);

        inner.arrival_log.extend(events.iter().cloned());
        inner.streams.entry(vin).or_default().extend(events);

        metrics::counter!("event_store_appends_total").increment(1);

        Ok(last_version)
    }

    async fn events_for_aggregate(&self, vin: &Vin) -> Result<Vec<EventEnvelope>> {
        let inner = self.inner.read().await;
        Ok(inner.streams.get(vin).cloned().unwrap_or_default())
    }

    async fn all_events_grouped(&self) -> Result<Vec<(Vin, Vec<EventEnvelope>)>> {
        let inner = self.inner.read().await;
        Ok(inner
            .streams
            .iter()
            .filter(|(_, log)| !log.is_empty())
            .map(|(vin, log)| (vin.clone(), log.clone()))
            .collect())
    }

    async fn events_by_type(&self, event_type: &str) -> Result<Vec<EventEnvelope>> {
        let inner = self.inner.read().await;
        Ok(inner
            .arrival_log
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect())
    }

    async fn aggregate_version(&self, vin: &Vin) -> Result<Option<Version>> {
        let inner = self.inner.read().await;
        Ok(inner
            .streams
            .get(vin)
            .and_then(|log| log.last())
            .map(|e| e.version))
    }

    async fn stream_all_events(&self) -> Result<EventStream> {
        use futures_util::stream;

        let inner = self.inner.read().await;
        let events = inner.arrival_log.clone();

        Ok(Box::pin(stream::iter(events.into_iter().map(Ok))))
    }
}
