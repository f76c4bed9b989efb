//! Rental truck domain: current-state records with a status machine.
//!
//! Unlike the fleet side, rental trucks are not event-sourced; commands
//! mutate in place and a rejected command leaves the truck untouched.

mod factory;
mod repository;
mod service;
mod status;
mod truck;

pub use factory::RentalTruckFactory;
pub use repository::{InMemoryRentalTruckRepository, RentalTruckRepository};
pub use service::RentalService;
pub use status::RentalTruckStatus;
pub use truck::{Rental, RentalTruck, RentalTruckSize};

use thiserror::Error;

/// Errors from rental truck commands.
#[derive(Debug, Error)]
pub enum RentalError {
    /// The truck is not in a reservable status.
    #[error("Truck cannot be reserved")]
    CannotReserve,

    /// Pick-up attempted without a reservation.
    #[error("Only reserved trucks can be picked up")]
    NotReserved,

    /// Drop-off attempted on a truck that is not out with a customer.
    #[error("Only rented trucks can be dropped off")]
    NotRented,

    /// The truck cannot be pulled from the rentable pool right now.
    #[error("Truck cannot be prevented from renting")]
    CannotPreventRenting,

    /// The truck is not in the unrentable state this command reverses.
    #[error("Truck is not rentable")]
    NotRentable,

    /// No size class is known for this make and model.
    #[error("No size known for make={make}, model={model}")]
    SizeNotFound { make: String, model: String },
}
