use common::{MakeModel, Vin};

use crate::lookup::TruckSizeLookup;

use super::truck::RentalTruck;
use super::RentalError;

/// Creates rentable trucks, resolving their size class at creation.
///
/// No partial trucks: an unresolvable make/model fails the whole creation.
pub struct RentalTruckFactory<L: TruckSizeLookup> {
    size_lookup: L,
}

impl<L: TruckSizeLookup> RentalTruckFactory<L> {
    pub fn new(size_lookup: L) -> Self {
        Self { size_lookup }
    }

    pub async fn create_rentable_truck(
        &self,
        vin: Vin,
        make_model: &MakeModel,
    ) -> Result<RentalTruck, RentalError> {
        let size = self
            .size_lookup
            .size_by_make_model(make_model)
            .await
            .ok_or_else(|| RentalError::SizeNotFound {
                make: make_model.make.clone(),
                model: make_model.model.clone(),
            })?;
        Ok(RentalTruck::new_rentable(vin, size))
    }
}
