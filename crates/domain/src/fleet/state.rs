use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a fleet truck.
///
/// Collapses yard presence and inspection into one machine: a truck is in
/// the yard, undergoing inspection, or out on the road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FleetTruckStatus {
    #[default]
    InYard,
    InInspection,
    OutOfYard,
}

impl fmt::Display for FleetTruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FleetTruckStatus::InYard => "IN_YARD",
            FleetTruckStatus::InInspection => "IN_INSPECTION",
            FleetTruckStatus::OutOfYard => "OUT_OF_YARD",
        };
        write!(f, "{name}")
    }
}
