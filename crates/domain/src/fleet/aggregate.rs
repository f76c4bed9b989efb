//! The fleet truck aggregate.

use common::{MakeModel, Vin};
use event_store::Version;

use crate::aggregate::Aggregate;

use super::events::FleetTruckEvent;
use super::state::FleetTruckStatus;
use super::FleetError;

/// One completed inspection, derived from replay.
///
/// `distance_since_last_inspection` is the odometer delta between this
/// inspection's reading and the reading the truck had accumulated before it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruckInspection {
    pub notes: String,
    pub odometer_reading: i32,
    pub distance_since_last_inspection: i32,
}

/// A truck owned by the fleet.
///
/// State is entirely a fold over the truck's event log; commands validate
/// against current state and return the events they would record without
/// mutating anything.
#[derive(Debug, Clone, Default)]
pub struct FleetTruck {
    vin: Option<Vin>,
    status: FleetTruckStatus,
    make_model: Option<MakeModel>,
    odometer_reading: i32,
    inspections: Vec<TruckInspection>,
    version: Version,
}

impl FleetTruck {
    pub fn status(&self) -> FleetTruckStatus {
        self.status
    }

    pub fn make_model(&self) -> Option<&MakeModel> {
        self.make_model.as_ref()
    }

    pub fn odometer_reading(&self) -> i32 {
        self.odometer_reading
    }

    pub fn inspections(&self) -> &[TruckInspection] {
        &self.inspections
    }

    /// Records the purchase of a new truck.
    ///
    /// Only legal on an uninitialized aggregate; a VIN is bought once.
    pub fn buy(
        &self,
        vin: Vin,
        make_model: MakeModel,
        odometer_reading: i32,
    ) -> Result<Vec<FleetTruckEvent>, FleetError> {
        if self.vin.is_some() {
            return Err(FleetError::DuplicateVin { vin });
        }
        Ok(vec![FleetTruckEvent::bought(vin, make_model, odometer_reading)])
    }

    /// Sends an in-yard truck off for inspection.
    pub fn send_for_inspection(&self) -> Result<Vec<FleetTruckEvent>, FleetError> {
        if self.status != FleetTruckStatus::InYard {
            return Err(FleetError::InvalidStateTransition {
                current_status: self.status,
                action: "send for inspection",
            });
        }
        Ok(vec![FleetTruckEvent::sent_for_inspection(self.require_vin()?)])
    }

    /// Records an inspection's outcome and brings the truck back to the yard.
    ///
    /// The reported odometer reading must not run backwards.
    pub fn return_from_inspection(
        &self,
        notes: impl Into<String>,
        odometer_reading: i32,
    ) -> Result<Vec<FleetTruckEvent>, FleetError> {
        if self.status != FleetTruckStatus::InInspection {
            return Err(FleetError::InvalidStateTransition {
                current_status: self.status,
                action: "return from inspection",
            });
        }
        if odometer_reading < self.odometer_reading {
            return Err(FleetError::OdometerRollback {
                current: self.odometer_reading,
                reported: odometer_reading,
            });
        }
        Ok(vec![FleetTruckEvent::returned_from_inspection(
            self.require_vin()?,
            notes,
            odometer_reading,
        )])
    }

    /// Takes an in-yard truck out on the road.
    pub fn remove_from_yard(&self) -> Result<Vec<FleetTruckEvent>, FleetError> {
        if self.status != FleetTruckStatus::InYard {
            return Err(FleetError::InvalidStateTransition {
                current_status: self.status,
                action: "remove from yard",
            });
        }
        Ok(vec![FleetTruckEvent::removed_from_yard(self.require_vin()?)])
    }

    /// Returns an out-of-yard truck, accumulating the distance it traveled.
    pub fn return_to_yard(&self, distance_traveled: i32) -> Result<Vec<FleetTruckEvent>, FleetError> {
        if self.status != FleetTruckStatus::OutOfYard {
            return Err(FleetError::InvalidStateTransition {
                current_status: self.status,
                action: "return to yard",
            });
        }
        Ok(vec![FleetTruckEvent::returned_to_yard(
            self.require_vin()?,
            distance_traveled,
        )])
    }

    fn require_vin(&self) -> Result<Vin, FleetError> {
        self.vin.clone().ok_or(FleetError::InvalidStateTransition {
            current_status: self.status,
            action: "operate an unowned truck",
        })
    }
}

impl Aggregate for FleetTruck {
    type Event = FleetTruckEvent;
    type Error = FleetError;

    fn aggregate_type() -> &'static str {
        "FleetTruck"
    }

    fn vin(&self) -> Option<&Vin> {
        self.vin.as_ref()
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: FleetTruckEvent) {
        match event {
            FleetTruckEvent::Bought(data) => {
                self.vin = Some(data.vin);
                self.make_model = Some(data.make_model);
                self.odometer_reading = data.odometer_reading;
                self.status = FleetTruckStatus::InYard;
            }
            FleetTruckEvent::SentForInspection(_) => {
                self.status = FleetTruckStatus::InInspection;
            }
            FleetTruckEvent::ReturnedFromInspection(data) => {
                let delta = data.odometer_reading - self.odometer_reading;
                self.inspections.push(TruckInspection {
                    notes: data.notes,
                    odometer_reading: data.odometer_reading,
                    distance_since_last_inspection: delta,
                });
                self.odometer_reading = data.odometer_reading;
                self.status = FleetTruckStatus::InYard;
            }
            FleetTruckEvent::RemovedFromYard(_) => {
                self.status = FleetTruckStatus::OutOfYard;
            }
            FleetTruckEvent::ReturnedToYard(data) => {
                self.odometer_reading += data.distance_traveled;
                self.status = FleetTruckStatus::InYard;
            }
        }
    }
}
