//! Fleet application service.

use common::Vin;
use event_store::{EventPublisher, EventStore};

use crate::error::DomainError;
use crate::lookup::TruckInfoLookup;
use crate::repository::EventSourcedRepository;

use super::aggregate::FleetTruck;
use super::commands::{
    BuyTruck, RemoveTruckFromYard, ReturnTruckFromInspection, ReturnTruckToYard,
    SendTruckForInspection,
};

/// Entry point for fleet-side use cases.
///
/// Every mutation goes through the event-sourced repository: replay, command,
/// append, publish.
pub struct FleetService<S, P, L>
where
    S: EventStore,
    P: EventPublisher,
    L: TruckInfoLookup,
{
    repository: EventSourcedRepository<S, P, FleetTruck>,
    truck_info_lookup: L,
}

impl<S, P, L> FleetService<S, P, L>
where
    S: EventStore,
    P: EventPublisher,
    L: TruckInfoLookup,
{
    pub fn new(store: S, publisher: P, truck_info_lookup: L) -> Self {
        Self {
            repository: EventSourcedRepository::new(store, publisher),
            truck_info_lookup,
        }
    }

    /// Buys a truck into the fleet.
    ///
    /// The make and model come from the info lookup; an unknown VIN cannot
    /// be bought.
    #[tracing::instrument(skip(self), fields(vin = %command.vin))]
    pub async fn buy_truck(&self, command: BuyTruck) -> Result<FleetTruck, DomainError> {
        let make_model = self
            .truck_info_lookup
            .make_model_by_vin(&command.vin)
            .await
            .ok_or_else(|| DomainError::UnknownMakeModel {
                vin: command.vin.clone(),
            })?;

        let result = self
            .repository
            .execute(&command.vin, |truck| {
                truck.buy(command.vin.clone(), make_model, command.odometer_reading)
            })
            .await?;

        tracing::info!(vin = %command.vin, "truck bought");
        Ok(result.aggregate)
    }

    #[tracing::instrument(skip(self), fields(vin = %command.vin))]
    pub async fn send_for_inspection(
        &self,
        command: SendTruckForInspection,
    ) -> Result<(), DomainError> {
        self.repository
            .execute_existing(&command.vin, |truck| truck.send_for_inspection())
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(vin = %command.vin))]
    pub async fn return_from_inspection(
        &self,
        command: ReturnTruckFromInspection,
    ) -> Result<(), DomainError> {
        self.repository
            .execute_existing(&command.vin, |truck| {
                truck.return_from_inspection(command.notes.clone(), command.odometer_reading)
            })
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(vin = %command.vin))]
    pub async fn remove_from_yard(&self, command: RemoveTruckFromYard) -> Result<(), DomainError> {
        self.repository
            .execute_existing(&command.vin, |truck| truck.remove_from_yard())
            .await?;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(vin = %command.vin))]
    pub async fn return_to_yard(&self, command: ReturnTruckToYard) -> Result<(), DomainError> {
        self.repository
            .execute_existing(&command.vin, |truck| {
                truck.return_to_yard(command.distance_traveled)
            })
            .await?;
        Ok(())
    }

    /// Loads one truck by replay, or None if the VIN has no events.
    pub async fn find_one(&self, vin: &Vin) -> Result<Option<FleetTruck>, DomainError> {
        self.repository.find_one(vin).await
    }

    /// Loads every truck, VIN ascending.
    pub async fn find_all(&self) -> Result<Vec<FleetTruck>, DomainError> {
        self.repository.find_all().await
    }
}
