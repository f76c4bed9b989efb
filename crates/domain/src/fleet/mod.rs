//! Fleet truck aggregate: event-sourced lifecycle of owned trucks.

mod aggregate;
mod commands;
mod events;
mod service;
mod state;

pub use aggregate::{FleetTruck, TruckInspection};
pub use commands::{
    BuyTruck, RemoveTruckFromYard, ReturnTruckFromInspection, ReturnTruckToYard,
    SendTruckForInspection,
};
pub use events::FleetTruckEvent;
pub use service::FleetService;
pub use state::FleetTruckStatus;

use thiserror::Error;

use common::Vin;

/// Errors from fleet truck commands.
#[derive(Debug, Error)]
pub enum FleetError {
    /// A truck with this VIN was already bought.
    #[error("Truck with VIN={vin} already exists")]
    DuplicateVin { vin: Vin },

    /// The command is not legal in the truck's current status.
    #[error("Cannot {action} truck in status {current_status}")]
    InvalidStateTransition {
        current_status: FleetTruckStatus,
        action: &'static str,
    },

    /// An inspection reported a lower odometer reading than the truck has
    /// already accumulated.
    #[error("Odometer reading {reported} is lower than current reading {current}")]
    OdometerRollback { current: i32, reported: i32 },
}
