use std::fmt;

use serde::{Deserialize, Serialize};

/// Rental-side status of a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RentalTruckStatus {
    Rentable,
    Reserved,
    Rented,
    NotRentable,
}

impl fmt::Display for RentalTruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RentalTruckStatus::Rentable => "RENTABLE",
            RentalTruckStatus::Reserved => "RESERVED",
            RentalTruckStatus::Rented => "RENTED",
            RentalTruckStatus::NotRentable => "NOT_RENTABLE",
        };
        write!(f, "{name}")
    }
}
