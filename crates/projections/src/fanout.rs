//! Publisher-side fan-out to projections.

use std::sync::Arc;

use async_trait::async_trait;
use event_store::{EventEnvelope, EventPublisher};

use crate::projection::Projection;

/// An [`EventPublisher`] that delivers each published event to a set of
/// projections.
///
/// Plugged into the repository's publish step, this keeps views current as
/// commands execute. Publication is fire-and-forget: a projection failure is
/// logged and the remaining projections still receive the event; a rebuild
/// through the processor recovers a view that fell behind.
#[derive(Clone, Default)]
pub struct FanOutPublisher {
    projections: Vec<Arc<dyn Projection>>,
}

impl FanOutPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a projection, consuming and returning the publisher so
    /// registrations chain.
    pub fn with(mut self, projection: Arc<dyn Projection>) -> Self {
        self.projections.push(projection);
        self
    }

    pub fn projection_count(&self) -> usize {
        self.projections.len()
    }
}

#[async_trait]
impl EventPublisher for FanOutPublisher {
    async fn publish(&self, event: &EventEnvelope) {
        for projection in &self.projections {
            if let Err(error) = projection.handle(event).await {
                tracing::warn!(
                    projection = projection.name(),
                    event_type = %event.event_type,
                    %error,
                    "projection failed to handle published event"
                );
            }
        }
    }
}
