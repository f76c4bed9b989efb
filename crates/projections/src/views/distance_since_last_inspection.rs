//! Distance-since-last-inspection read model.
//!
//! Answers "which trucks are due for inspection" without replaying whole
//! logs: yard returns accumulate distance, an inspection return resets it.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::Vin;
use domain::{DomainEvent, EventCodec, FleetTruckEvent};
use event_store::EventEnvelope;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::ReadModel;
use crate::Result;

/// One row of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceSinceLastInspection {
    pub vin: Vin,
    pub distance_since_last_inspection: i32,
}

struct ViewState {
    rows: BTreeMap<Vin, i32>,
    position: ProjectionPosition,
}

/// Tracks per-truck distance traveled since the last completed inspection.
#[derive(Clone)]
pub struct DistanceSinceLastInspectionView {
    codec: Arc<EventCodec<FleetTruckEvent>>,
    state: Arc<RwLock<ViewState>>,
}

impl DistanceSinceLastInspectionView {
    pub fn new() -> Self {
        Self {
            codec: Arc::new(FleetTruckEvent::codec()),
            state: Arc::new(RwLock::new(ViewState {
                rows: BTreeMap::new(),
                position: ProjectionPosition::zero(),
            })),
        }
    }

    pub async fn get(&self, vin: &Vin) -> Option<i32> {
        self.state.read().await.rows.get(vin).copied()
    }

    /// Every row, VIN ascending.
    pub async fn all(&self) -> Vec<DistanceSinceLastInspection> {
        self.state
            .read()
            .await
            .rows
            .iter()
            .map(|(vin, distance)| DistanceSinceLastInspection {
                vin: vin.clone(),
                distance_since_last_inspection: *distance,
            })
            .collect()
    }
}

impl Default for DistanceSinceLastInspectionView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Projection for DistanceSinceLastInspectionView {
    fn name(&self) -> &'static str {
        "DistanceSinceLastInspectionView"
    }

    async fn handle(&self, event: &EventEnvelope) -> Result<()> {
        let mut state = self.state.write().await;
        state.position = state.position.advance();

        if event.aggregate_type != "FleetTruck" {
            return Ok(());
        }

        let fleet_event = self
            .codec
            .decode(&event.event_type, event.payload.clone())?;

        match fleet_event {
            FleetTruckEvent::Bought(data) => {
                state.rows.insert(data.vin, 0);
            }
            FleetTruckEvent::ReturnedToYard(data) => {
                *state.rows.entry(data.vin).or_insert(0) += data.distance_traveled;
            }
            FleetTruckEvent::ReturnedFromInspection(data) => {
                state.rows.insert(data.vin, 0);
            }
            FleetTruckEvent::SentForInspection(_) | FleetTruckEvent::RemovedFromYard(_) => {}
        }

        Ok(())
    }

    async fn position(&self) -> ProjectionPosition {
        self.state.read().await.position
    }

    async fn reset(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.rows.clear();
        state.position = ProjectionPosition::zero();
        Ok(())
    }
}

impl ReadModel for DistanceSinceLastInspectionView {
    fn name(&self) -> &'static str {
        "DistanceSinceLastInspectionView"
    }

    fn count(&self) -> usize {
        self.state.try_read().map(|s| s.rows.len()).unwrap_or(0)
    }
}
