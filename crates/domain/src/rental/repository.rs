//! Rental truck persistence.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::Vin;

use super::status::RentalTruckStatus;
use super::truck::RentalTruck;

/// Store of current rental truck state, keyed by VIN.
#[async_trait]
pub trait RentalTruckRepository: Send + Sync {
    /// Inserts or replaces the truck's record.
    async fn save(&self, truck: RentalTruck);

    async fn find_one(&self, vin: &Vin) -> Option<RentalTruck>;

    async fn find_by_confirmation_number(&self, confirmation_number: Uuid) -> Option<RentalTruck>;

    /// Returns the first truck in the given status, VIN ascending.
    async fn find_first_by_status(&self, status: RentalTruckStatus) -> Option<RentalTruck>;

    /// Returns every truck, VIN ascending.
    async fn find_all(&self) -> Vec<RentalTruck>;
}

/// In-memory rental truck store.
///
/// A BTreeMap keyed by VIN makes ordered scans and the first-by-status
/// tie-break fall out of iteration order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRentalTruckRepository {
    inner: Arc<RwLock<BTreeMap<Vin, RentalTruck>>>,
}

impl InMemoryRentalTruckRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RentalTruckRepository for InMemoryRentalTruckRepository {
    async fn save(&self, truck: RentalTruck) {
        self.inner.write().await.insert(truck.vin().clone(), truck);
    }

    async fn find_one(&self, vin: &Vin) -> Option<RentalTruck> {
        self.inner.read().await.get(vin).cloned()
    }

    async fn find_by_confirmation_number(&self, confirmation_number: Uuid) -> Option<RentalTruck> {
        self.inner
            .read()
            .await
            .values()
            .find(|truck| {
                truck
                    .rental()
                    .is_some_and(|rental| rental.confirmation_number() == confirmation_number)
            })
            .cloned()
    }

    async fn find_first_by_status(&self, status: RentalTruckStatus) -> Option<RentalTruck> {
        self.inner
            .read()
            .await
            .values()
            .find(|truck| truck.status() == status)
            .cloned()
    }

    async fn find_all(&self) -> Vec<RentalTruck> {
        self.inner.read().await.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rental::RentalTruckSize;

    fn truck(vin: &str) -> RentalTruck {
        RentalTruck::new_rentable(Vin::new(vin), RentalTruckSize::Small)
    }

    #[tokio::test]
    async fn save_then_find_one() {
        let repo = InMemoryRentalTruckRepository::new();
        repo.save(truck("test-0001")).await;

        let found = repo.find_one(&Vin::new("test-0001")).await;
        assert!(found.is_some());
        assert!(repo.find_one(&Vin::new("test-9999")).await.is_none());
    }

    #[tokio::test]
    async fn first_by_status_breaks_ties_by_vin() {
        let repo = InMemoryRentalTruckRepository::new();
        repo.save(truck("test-0003")).await;
        repo.save(truck("test-0001")).await;
        repo.save(truck("test-0002")).await;

        let first = repo
            .find_first_by_status(RentalTruckStatus::Rentable)
            .await
            .unwrap();
        assert_eq!(first.vin(), &Vin::new("test-0001"));
    }

    #[tokio::test]
    async fn find_by_confirmation_number_matches_the_active_rental() {
        let repo = InMemoryRentalTruckRepository::new();
        let mut reserved = truck("test-0001");
        reserved.reserve("Bob").unwrap();
        let confirmation = reserved.rental().unwrap().confirmation_number();
        repo.save(reserved).await;
        repo.save(truck("test-0002")).await;

        let found = repo.find_by_confirmation_number(confirmation).await.unwrap();
        assert_eq!(found.vin(), &Vin::new("test-0001"));

        assert!(repo.find_by_confirmation_number(Uuid::new_v4()).await.is_none());
    }

    #[tokio::test]
    async fn find_all_is_vin_ascending() {
        let repo = InMemoryRentalTruckRepository::new();
        repo.save(truck("test-0002")).await;
        repo.save(truck("test-0001")).await;

        let vins: Vec<String> = repo
            .find_all()
            .await
            .iter()
            .map(|t| t.vin().to_string())
            .collect();
        assert_eq!(vins, vec!["test-0001", "test-0002"]);
    }
}
