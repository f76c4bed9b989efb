//! Fleet truck commands.
//!
//! Plain data carried into [`FleetService`](super::FleetService) methods;
//! validation happens on the aggregate.

use common::Vin;

#[derive(Debug, Clone)]
pub struct BuyTruck {
    pub vin: Vin,
    pub odometer_reading: i32,
}

#[derive(Debug, Clone)]
pub struct SendTruckForInspection {
    pub vin: Vin,
}

#[derive(Debug, Clone)]
pub struct ReturnTruckFromInspection {
    pub vin: Vin,
    pub notes: String,
    pub odometer_reading: i32,
}

#[derive(Debug, Clone)]
pub struct RemoveTruckFromYard {
    pub vin: Vin,
}

#[derive(Debug, Clone)]
pub struct ReturnTruckToYard {
    pub vin: Vin,
    pub distance_traveled: i32,
}
