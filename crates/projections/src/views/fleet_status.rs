//! Fleet status read model: one current-state row per truck.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{MakeModel, Vin};
use domain::{DomainEvent, EventCodec, FleetTruckEvent, FleetTruckStatus};
use event_store::EventEnvelope;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::projection::{Projection, ProjectionPosition};
use crate::read_model::ReadModel;
use crate::Result;

/// Current status of one fleet truck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetStatusRow {
    pub vin: Vin,
    pub status: FleetTruckStatus,
    pub make_model: MakeModel,
    pub odometer_reading: i32,
}

struct ViewState {
    rows: BTreeMap<Vin, FleetStatusRow>,
    position: ProjectionPosition,
}

/// Denormalized per-truck status, updated from fleet events.
#[derive(Clone)]
pub struct FleetStatusView {
    codec: Arc<EventCodec<FleetTruckEvent>>,
    state: Arc<RwLock<ViewState>>,
}

impl FleetStatusView {
    pub fn new() -> Self {
        Self {
            codec: Arc::new(FleetTruckEvent::codec()),
            state: Arc::new(RwLock::new(ViewState {
                rows: BTreeMap::new(),
                position: ProjectionPosition::zero(),
            })),
        }
    }

    pub async fn get(&self, vin: &Vin) -> Option<FleetStatusRow> {
        self.state.read().await.rows.get(vin).cloned()
    }

    /// Every row, VIN ascending.
    pub async fn all(&self) -> Vec<FleetStatusRow> {
        self.state.read().await.rows.values().cloned().collect()
    }

    /// Rows currently in the given status, VIN ascending.
    pub async fn by_status(&self, status: FleetTruckStatus) -> Vec<FleetStatusRow> {
        self.state
            .read()
            .await
            .rows
            .values()
            .filter(|row| row.status == status)
            .cloned()
            .collect()
    }
}

impl Default for FleetStatusView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Projection for FleetStatusView {
    fn name(&self) -> &'static str {
        "FleetStatusView"
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
                state.rows.insert(
                    data.vin.clone(),
                    FleetStatusRow {
                        vin: data.vin,
                        status: FleetTruckStatus::InYard,
                        make_model: data.make_model,
                        odometer_reading: data.odometer_reading,
                    },
                );
            }
            FleetTruckEvent::SentForInspection(data) => {
                if let Some(row) = state.rows.get_mut(&data.vin) {
                    row.status = FleetTruckStatus::InInspection;
                }
            }
            FleetTruckEvent::ReturnedFromInspection(data) => {
                if let Some(row) = state.rows.get_mut(&data.vin) {
                    row.status = FleetTruckStatus::InYard;
                    row.odometer_reading = data.odometer_reading;
                }
            }
            FleetTruckEvent::RemovedFromYard(data) => {
                if let Some(row) = state.rows.get_mut(&data.vin) {
                    row.status = FleetTruckStatus::OutOfYard;
                }
            }
            FleetTruckEvent::ReturnedToYard(data) => {
                if let Some(row) = state.rows.get_mut(&data.vin) {
                    row.status = FleetTruckStatus::InYard;
                    row.odometer_reading += data.distance_traveled;
                }
            }
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

impl ReadModel for FleetStatusView {
    fn name(&self) -> &'static str {
        "FleetStatusView"
    }

    fn count(&self) -> usize {
        self.state.try_read().map(|s| s.rows.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_store::Version;

    fn envelope(version: i64, event: &FleetTruckEvent) -> EventEnvelope {
        let payload = event.payload().unwrap();
        EventEnvelope::builder()
            .vin(event.vin().clone())
            .aggregate_type("FleetTruck")
            .event_type(event.event_type())
            .version(Version::new(version))
            .payload(payload)
            .build()
    }

    #[tokio::test]
    async fn tracks_status_and_odometer_through_a_lifecycle() {
        let view = FleetStatusView::new();
        let vin = Vin::new("test-0001");

        let events = vec![
            FleetTruckEvent::bought(vin.clone(), MakeModel::new("TruckCo", "The Big One"), 1000),
            FleetTruckEvent::sent_for_inspection(vin.clone()),
            FleetTruckEvent::returned_from_inspection(vin.clone(), "ok", 1200),
            FleetTruckEvent::removed_from_yard(vin.clone()),
            FleetTruckEvent::returned_to_yard(vin.clone(), 300),
        ];
        for (i, event) in events.iter().enumerate() {
            view.handle(&envelope(i as i64 + 1, event)).await.unwrap();
        }

        let row = view.get(&vin).await.unwrap();
        assert_eq!(row.status, FleetTruckStatus::InYard);
        assert_eq!(row.odometer_reading, 1500);
        assert_eq!(row.make_model, MakeModel::new("TruckCo", "The Big One"));
    }

    #[tokio::test]
    async fn by_status_filters_rows() {
        let view = FleetStatusView::new();

        for (i, vin) in ["test-0001", "test-0002"].iter().enumerate() {
            let event = FleetTruckEvent::bought(
                Vin::new(*vin),
                MakeModel::new("TruckCo", "The Small One"),
                0,
            );
            view.handle(&envelope(i as i64 + 1, &event)).await.unwrap();
        }
        view.handle(&envelope(
            3,
            &FleetTruckEvent::removed_from_yard(Vin::new("test-0002")),
        ))
        .await
        .unwrap();

        let out = view.by_status(FleetTruckStatus::OutOfYard).await;
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].vin, Vin::new("test-0002"));

        let in_yard = view.by_status(FleetTruckStatus::InYard).await;
        assert_eq!(in_yard.len(), 1);
        assert_eq!(in_yard[0].vin, Vin::new("test-0001"));
    }
}
