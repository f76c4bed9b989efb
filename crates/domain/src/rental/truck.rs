//! The rental truck record and its status machine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::Vin;

use super::status::RentalTruckStatus;
use super::RentalError;

/// Size class of a rental truck, resolved once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalTruckSize {
    Small,
    Medium,
    Large,
}

/// An active rental: who has the truck and under which confirmation number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    confirmation_number: Uuid,
    customer_name: String,
}

impl Rental {
    fn new(customer_name: String) -> Self {
        Self {
            confirmation_number: Uuid::new_v4(),
            customer_name,
        }
    }

    pub fn confirmation_number(&self) -> Uuid {
        self.confirmation_number
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }
}

/// A truck in the rental pool.
///
/// Commands validate against the current status before mutating; a rejected
/// command changes nothing.
#[derive(Debug, Clone)]
pub struct RentalTruck {
    vin: Vin,
    status: RentalTruckStatus,
    size: RentalTruckSize,
    rental: Option<Rental>,
    total_distance_traveled: i32,
}

impl RentalTruck {
    pub(super) fn new_rentable(vin: Vin, size: RentalTruckSize) -> Self {
        Self {
            vin,
            status: RentalTruckStatus::Rentable,
            size,
            rental: None,
            total_distance_traveled: 0,
        }
    }

    pub fn vin(&self) -> &Vin {
        &self.vin
    }

    pub fn status(&self) -> RentalTruckStatus {
        self.status
    }

    pub fn size(&self) -> RentalTruckSize {
        self.size
    }

    pub fn rental(&self) -> Option<&Rental> {
        self.rental.as_ref()
    }

    pub fn total_distance_traveled(&self) -> i32 {
        self.total_distance_traveled
    }

    /// Reserves the truck for a customer, issuing a confirmation number.
    pub fn reserve(&mut self, customer_name: impl Into<String>) -> Result<(), RentalError> {
        if self.status != RentalTruckStatus::Rentable {
            return Err(RentalError::CannotReserve);
        }
        self.rental = Some(Rental::new(customer_name.into()));
        self.status = RentalTruckStatus::Reserved;
        Ok(())
    }

    /// Hands a reserved truck over to the customer.
    pub fn pick_up(&mut self) -> Result<(), RentalError> {
        if self.status != RentalTruckStatus::Reserved {
            return Err(RentalError::NotReserved);
        }
        self.status = RentalTruckStatus::Rented;
        Ok(())
    }

    /// Takes the truck back, clearing the rental and accumulating the
    /// distance the customer drove.
    pub fn drop_off(&mut self, distance_traveled: i32) -> Result<(), RentalError> {
        if self.status != RentalTruckStatus::Rented {
            return Err(RentalError::NotRented);
        }
        self.rental = None;
        self.total_distance_traveled += distance_traveled;
        self.status = RentalTruckStatus::Rentable;
        Ok(())
    }

    /// Pulls the truck from the rentable pool.
    pub fn prevent_renting(&mut self) -> Result<(), RentalError> {
        if self.status != RentalTruckStatus::Rentable {
            return Err(RentalError::CannotPreventRenting);
        }
        self.status = RentalTruckStatus::NotRentable;
        Ok(())
    }

    /// Puts an unrentable truck back in the pool.
    pub fn allow_renting(&mut self) -> Result<(), RentalError> {
        if self.status != RentalTruckStatus::NotRentable {
            return Err(RentalError::NotRentable);
        }
        self.status = RentalTruckStatus::Rentable;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rentable_truck() -> RentalTruck {
        RentalTruck::new_rentable(Vin::new("test-0001"), RentalTruckSize::Large)
    }

    #[test]
    fn reserve_issues_a_confirmation() {
        let mut truck = rentable_truck();

        truck.reserve("some-customer-name").unwrap();

        assert_eq!(truck.status(), RentalTruckStatus::Reserved);
        let rental = truck.rental().unwrap();
        assert_eq!(rental.customer_name(), "some-customer-name");
    }

    #[test]
    fn pick_up_moves_to_rented() {
        let mut truck = rentable_truck();
        truck.reserve("some-customer-name").unwrap();

        truck.pick_up().unwrap();

        assert_eq!(truck.status(), RentalTruckStatus::Rented);
    }

    #[test]
    fn drop_off_clears_rental_and_accumulates_distance() {
        let mut truck = rentable_truck();
        truck.reserve("Bob").unwrap();
        truck.pick_up().unwrap();

        truck.drop_off(150).unwrap();

        assert_eq!(truck.status(), RentalTruckStatus::Rentable);
        assert!(truck.rental().is_none());
        assert_eq!(truck.total_distance_traveled(), 150);
    }

    #[test]
    fn prevent_and_allow_renting_round_trip() {
        let mut truck = rentable_truck();

        truck.prevent_renting().unwrap();
        assert_eq!(truck.status(), RentalTruckStatus::NotRentable);

        truck.allow_renting().unwrap();
        assert_eq!(truck.status(), RentalTruckStatus::Rentable);
    }

    #[test]
    fn reserve_when_anything_but_rentable() {
        let mut truck = rentable_truck();
        truck.prevent_renting().unwrap();

        let err = truck.reserve("some-customer-name").unwrap_err();

        assert_eq!(err.to_string(), "Truck cannot be reserved");
        assert_eq!(truck.status(), RentalTruckStatus::NotRentable);
    }

    #[test]
    fn pick_up_when_not_reserved() {
        let mut truck = rentable_truck();

        let err = truck.pick_up().unwrap_err();

        assert_eq!(err.to_string(), "Only reserved trucks can be picked up");
        assert_eq!(truck.status(), RentalTruckStatus::Rentable);
    }

    #[test]
    fn drop_off_when_not_picked_up() {
        let mut truck = rentable_truck();
        truck.reserve("some-customer-name").unwrap();

        let err = truck.drop_off(10).unwrap_err();

        assert_eq!(err.to_string(), "Only rented trucks can be dropped off");
        assert_eq!(truck.status(), RentalTruckStatus::Reserved);
        assert_eq!(truck.total_distance_traveled(), 0);
    }

    #[test]
    fn prevent_renting_when_anything_but_rentable() {
        let mut truck = rentable_truck();
        truck.reserve("some-customer-name").unwrap();

        let err = truck.prevent_renting().unwrap_err();

        assert_eq!(err.to_string(), "Truck cannot be prevented from renting");
        assert_eq!(truck.status(), RentalTruckStatus::Reserved);
    }

    #[test]
    fn allow_renting_when_already_rentable() {
        let mut truck = rentable_truck();

        let err = truck.allow_renting().unwrap_err();

        assert_eq!(err.to_string(), "Truck is not rentable");
        assert_eq!(truck.status(), RentalTruckStatus::Rentable);
    }

    #[test]
    fn distance_accumulates_across_rentals() {
        let mut truck = rentable_truck();

        truck.reserve("Bob").unwrap();
        truck.pick_up().unwrap();
        truck.drop_off(150).unwrap();

        truck.reserve("Alice").unwrap();
        truck.pick_up().unwrap();
        truck.drop_off(50).unwrap();

        assert_eq!(truck.total_distance_traveled(), 200);
    }
}
