//! Domain error types.

use thiserror::Error;
use uuid::Uuid;

use common::Vin;
use event_store::EventStoreError;

use crate::codec::CodecError;
use crate::fleet::FleetError;
use crate::rental::RentalError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the event store.
    #[error("Event store error: {0}")]
    EventStore(#[from] EventStoreError),

    /// An event could not be encoded or decoded.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// A fleet truck command was rejected.
    #[error("Fleet error: {0}")]
    Fleet(#[from] FleetError),

    /// A rental truck command was rejected.
    #[error("Rental error: {0}")]
    Rental(#[from] RentalError),

    /// No truck with this VIN exists.
    #[error("No truck found with VIN={vin}")]
    TruckNotFound { vin: Vin },

    /// No rental exists for this confirmation number.
    #[error("No rental found for id={confirmation_number}")]
    RentalNotFound { confirmation_number: Uuid },

    /// No trucks are currently available to rent.
    #[error("No trucks available to rent")]
    NoTrucksAvailable,

    /// The make/model for a VIN could not be resolved.
    #[error("No make/model known for VIN={vin}")]
    UnknownMakeModel { vin: Vin },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
