//! The projection trait and its position counter.

use async_trait::async_trait;
use event_store::EventEnvelope;

use crate::Result;

/// Count of events a projection has folded in, in store insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ProjectionPosition(u64);

impl ProjectionPosition {
    pub fn zero() -> Self {
        Self(0)
    }

    pub fn advance(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn events_processed(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProjectionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "position({})", self.0)
    }
}

/// Folds published events into a read model.
///
/// Handlers must tolerate redelivery of events they have already seen in
/// order (the position guards catch-up, not direct delivery).
#[async_trait]
pub trait Projection: Send + Sync {
    fn name(&self) -> &'static str;

    /// Folds a single event into the view.
    async fn handle(&self, event: &EventEnvelope) -> Result<()>;

    /// Returns how far this projection has caught up.
    async fn position(&self) -> ProjectionPosition;

    /// Drops all derived state, ready for a rebuild.
    async fn reset(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_advances_from_zero() {
        let pos = ProjectionPosition::zero().advance().advance();
        assert_eq!(pos.events_processed(), 2);
        assert_eq!(pos.to_string(), "position(2)");
    }
}
