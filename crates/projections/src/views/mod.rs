//! Read model views over fleet events.

mod distance_since_last_inspection;
mod fleet_status;

pub use distance_since_last_inspection::{
    DistanceSinceLastInspection, DistanceSinceLastInspectionView,
};
pub use fleet_status::{FleetStatusRow, FleetStatusView};
