use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::EventEnvelope;

/// Sink for events that have been durably appended.
///
/// Publication is fire-and-forget with at-least-once delivery semantics;
/// consumers are read-model projections and other subscribers outside the
/// consistency boundary. Repositories publish only after a successful
/// append, in append order, and always receive their publisher as an
/// explicit constructor dependency.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single event to subscribers.
    async fn publish(&self, event: &EventEnvelope);
}

/// Publisher that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventPublisher;

#[async_trait]
impl EventPublisher for NullEventPublisher {
    async fn publish(&self, event: &EventEnvelope) {
        tracing::trace!(event_type = %event.event_type, vin = %event.vin, "event dropped");
    }
}

/// Publisher that records every event it receives, for assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingEventPublisher {
    events: Arc<RwLock<Vec<EventEnvelope>>>,
}

impl RecordingEventPublisher {
    /// Creates a new empty recording publisher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all published events in publication order.
    pub async fn published(&self) -> Vec<EventEnvelope> {
        self.events.read().await.clone()
    }

    /// Returns the number of published events.
    pub async fn published_count(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: &EventEnvelope) {
        self.events.write().await.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Version;
    use common::Vin;

    fn envelope(event_type: &str) -> EventEnvelope {
        EventEnvelope::builder()
            .vin(Vin::new("test-0001"))
            .aggregate_type("FleetTruck")
            .event_type(event_type)
            .version(Version::first())
            .payload(serde_json::json!({}))
            .build()
    }

    #[tokio::test]
    async fn recording_publisher_preserves_order() {
        let publisher = RecordingEventPublisher::new();

        publisher.publish(&envelope("TruckBought")).await;
        publisher.publish(&envelope("TruckSentForInspection")).await;

        let published = publisher.published().await;
        assert_eq!(published.len(), 2);
        assert_eq!(published[0].event_type, "TruckBought");
        assert_eq!(published[1].event_type, "TruckSentForInspection");
    }

    #[tokio::test]
    async fn null_publisher_accepts_events() {
        let publisher = NullEventPublisher;
        publisher.publish(&envelope("TruckBought")).await;
    }
}
