//! Lookup clients for truck reference data.
//!
//! Make/model and size data live outside the event logs; these traits keep
//! the services decoupled from wherever that data actually resides.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::{MakeModel, Vin};

use crate::rental::RentalTruckSize;

/// Resolves a VIN to its make and model.
#[async_trait]
pub trait TruckInfoLookup: Send + Sync {
    async fn make_model_by_vin(&self, vin: &Vin) -> Option<MakeModel>;
}

/// Resolves a make/model pair to a rental size class.
#[async_trait]
pub trait TruckSizeLookup: Send + Sync {
    async fn size_by_make_model(&self, make_model: &MakeModel) -> Option<RentalTruckSize>;
}

/// In-memory VIN-to-make/model table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTruckInfoLookup {
    inner: Arc<RwLock<HashMap<Vin, MakeModel>>>,
}

impl InMemoryTruckInfoLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a VIN's make and model, consuming and returning the lookup
    /// so registrations chain.
    pub async fn with_truck(self, vin: Vin, make_model: MakeModel) -> Self {
        self.inner.write().await.insert(vin, make_model);
        self
    }

    pub async fn insert(&self, vin: Vin, make_model: MakeModel) {
        self.inner.write().await.insert(vin, make_model);
    }
}

#[async_trait]
impl TruckInfoLookup for InMemoryTruckInfoLookup {
    async fn make_model_by_vin(&self, vin: &Vin) -> Option<MakeModel> {
        self.inner.read().await.get(vin).cloned()
    }
}

/// In-memory make/model-to-size table, seeded with the known catalog.
#[derive(Debug, Clone)]
pub struct InMemoryTruckSizeLookup {
    table: HashMap<(String, String), RentalTruckSize>,
}

impl InMemoryTruckSizeLookup {
    pub fn new() -> Self {
        let mut table = HashMap::new();
        table.insert(
            ("TruckCo".to_string(), "The Big One".to_string()),
            RentalTruckSize::Large,
        );
        table.insert(
            ("TruckCo".to_string(), "The Small One".to_string()),
            RentalTruckSize::Small,
        );
        Self { table }
    }
}

impl Default for InMemoryTruckSizeLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TruckSizeLookup for InMemoryTruckSizeLookup {
    async fn size_by_make_model(&self, make_model: &MakeModel) -> Option<RentalTruckSize> {
        self.table
            .get(&(make_model.make.clone(), make_model.model.clone()))
            .copied()
    }
}
