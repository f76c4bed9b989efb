//! Query-side views over the fleet event log.
//!
//! Projections fold published events into denormalized read models:
//! - [`Projection`] processes events into a view
//! - [`ProjectionProcessor`] catches views up from the store and rebuilds them
//! - [`FanOutPublisher`] plugs projections into the write path as an
//!   event publisher
//! - Views: [`DistanceSinceLastInspectionView`], [`FleetStatusView`]

pub mod error;
pub mod fanout;
pub mod processor;
pub mod projection;
pub mod read_model;
pub mod views;

pub use error::{ProjectionError, Result};
pub use fanout::FanOutPublisher;
pub use processor::ProjectionProcessor;
pub use projection::{Projection, ProjectionPosition};
pub use read_model::ReadModel;
pub use views::{DistanceSinceLastInspectionView, FleetStatusView};
