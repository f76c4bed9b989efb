//! Domain layer for the truck tracking system.
//!
//! Two aggregates track the same physical truck through parallel lifecycles:
//! - [`FleetTruck`]: event-sourced; its state is a fold over an append-only
//!   event log and every command returns the events it would record
//! - [`RentalTruck`]: a current-state record with its own status machine
//!
//! The [`EventSourcedRepository`] orchestrates load (replay through the
//! [`codec::EventCodec`]) and save (contiguous-version append, then publish).

pub mod aggregate;
pub mod codec;
pub mod error;
pub mod fleet;
pub mod lookup;
pub mod rental;
pub mod repository;

pub use aggregate::{Aggregate, DomainEvent};
pub use codec::{CodecError, EventCodec};
pub use error::DomainError;
pub use fleet::{
    BuyTruck, FleetError, FleetService, FleetTruck, FleetTruckEvent, FleetTruckStatus,
    RemoveTruckFromYard, ReturnTruckFromInspection, ReturnTruckToYard, SendTruckForInspection,
    TruckInspection,
};
pub use lookup::{
    InMemoryTruckInfoLookup, InMemoryTruckSizeLookup, TruckInfoLookup, TruckSizeLookup,
};
pub use rental::{
    InMemoryRentalTruckRepository, Rental, RentalError, RentalService, RentalTruck,
    RentalTruckFactory, RentalTruckRepository, RentalTruckSize, RentalTruckStatus,
};
pub use repository::{CommandResult, EventSourcedRepository};
