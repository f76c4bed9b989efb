//! Rental application service.

use uuid::Uuid;

use common::{MakeModel, Vin};

use crate::error::DomainError;
use crate::lookup::TruckSizeLookup;

use super::factory::RentalTruckFactory;
use super::repository::RentalTruckRepository;
use super::status::RentalTruckStatus;
use super::truck::{Rental, RentalTruck};

/// Entry point for rental-side use cases.
pub struct RentalService<R, L>
where
    R: RentalTruckRepository,
    L: TruckSizeLookup,
{
    repository: R,
    factory: RentalTruckFactory<L>,
}

impl<R, L> RentalService<R, L>
where
    R: RentalTruckRepository,
    L: TruckSizeLookup,
{
    pub fn new(repository: R, size_lookup: L) -> Self {
        Self {
            repository,
            factory: RentalTruckFactory::new(size_lookup),
        }
    }

    /// Adds a truck to the rental pool.
    ///
    /// New trucks enter unrentable; the fleet side clears them for rental
    /// once inspected.
    #[tracing::instrument(skip(self), fields(vin = %vin))]
    pub async fn add_truck(&self, vin: Vin, make_model: &MakeModel) -> Result<(), DomainError> {
        let mut truck = self.factory.create_rentable_truck(vin, make_model).await?;
        truck.prevent_renting().map_err(DomainError::Rental)?;
        self.repository.save(truck).await;
        Ok(())
    }

    /// Reserves the first rentable truck for a customer.
    #[tracing::instrument(skip(self, customer_name))]
    pub async fn reserve(&self, customer_name: impl Into<String>) -> Result<Rental, DomainError> {
        let mut truck = self
            .repository
            .find_first_by_status(RentalTruckStatus::Rentable)
            .await
            .ok_or(DomainError::NoTrucksAvailable)?;

        truck.reserve(customer_name).map_err(DomainError::Rental)?;
        // reserve just succeeded, so the rental is present
        let rental = truck
            .rental()
            .cloned()
            .ok_or(DomainError::NoTrucksAvailable)?;

        self.repository.save(truck).await;
        tracing::info!(confirmation_number = %rental.confirmation_number(), "truck reserved");
        Ok(rental)
    }

    #[tracing::instrument(skip(self))]
    pub async fn pick_up(&self, confirmation_number: Uuid) -> Result<(), DomainError> {
        let mut truck = self.find_by_confirmation(confirmation_number).await?;
        truck.pick_up().map_err(DomainError::Rental)?;
        self.repository.save(truck).await;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn drop_off(
        &self,
        confirmation_number: Uuid,
        distance_traveled: i32,
    ) -> Result<(), DomainError> {
        let mut truck = self.find_by_confirmation(confirmation_number).await?;
        truck.drop_off(distance_traveled).map_err(DomainError::Rental)?;
        self.repository.save(truck).await;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(vin = %vin))]
    pub async fn prevent_renting(&self, vin: &Vin) -> Result<(), DomainError> {
        let mut truck = self.find_existing(vin).await?;
        truck.prevent_renting().map_err(DomainError::Rental)?;
        self.repository.save(truck).await;
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(vin = %vin))]
    pub async fn allow_renting(&self, vin: &Vin) -> Result<(), DomainError> {
        let mut truck = self.find_existing(vin).await?;
        truck.allow_renting().map_err(DomainError::Rental)?;
        self.repository.save(truck).await;
        Ok(())
    }

    pub async fn find_all(&self) -> Vec<RentalTruck> {
        self.repository.find_all().await
    }

    async fn find_existing(&self, vin: &Vin) -> Result<RentalTruck, DomainError> {
        self.repository
            .find_one(vin)
            .await
            .ok_or_else(|| DomainError::TruckNotFound { vin: vin.clone() })
    }

    async fn find_by_confirmation(
        &self,
        confirmation_number: Uuid,
    ) -> Result<RentalTruck, DomainError> {
        self.repository
            .find_by_confirmation_number(confirmation_number)
            .await
            .ok_or(DomainError::RentalNotFound {
                confirmation_number,
            })
    }
}
