//! Fleet truck domain events.
//!
//! One variant per recorded lifecycle transition. Each carries the VIN, the
//! data needed to replay the transition, and when it happened. Type tags are
//! stable; the stored log decodes by tag forever.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::{MakeModel, Vin};

use crate::aggregate::DomainEvent;
use crate::codec::EventCodec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckBoughtData {
    pub vin: Vin,
    pub make_model: MakeModel,
    pub odometer_reading: i32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckSentForInspectionData {
    pub vin: Vin,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckReturnedFromInspectionData {
    pub vin: Vin,
    pub notes: String,
    pub odometer_reading: i32,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckRemovedFromYardData {
    pub vin: Vin,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckReturnedToYardData {
    pub vin: Vin,
    pub distance_traveled: i32,
    pub occurred_at: DateTime<Utc>,
}

/// Events in a fleet truck's lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum FleetTruckEvent {
    Bought(TruckBoughtData),
    SentForInspection(TruckSentForInspectionData),
    ReturnedFromInspection(TruckReturnedFromInspectionData),
    RemovedFromYard(TruckRemovedFromYardData),
    ReturnedToYard(TruckReturnedToYardData),
}

impl FleetTruckEvent {
    pub fn bought(vin: Vin, make_model: MakeModel, odometer_reading: i32) -> Self {
        Self::Bought(TruckBoughtData {
            vin,
            make_model,
            odometer_reading,
            occurred_at: Utc::now(),
        })
    }

    pub fn sent_for_inspection(vin: Vin) -> Self {
        Self::SentForInspection(TruckSentForInspectionData {
            vin,
            occurred_at: Utc::now(),
        })
    }

    pub fn returned_from_inspection(vin: Vin, notes: impl Into<String>, odometer_reading: i32) -> Self {
        Self::ReturnedFromInspection(TruckReturnedFromInspectionData {
            vin,
            notes: notes.into(),
            odometer_reading,
            occurred_at: Utc::now(),
        })
    }

    pub fn removed_from_yard(vin: Vin) -> Self {
        Self::RemovedFromYard(TruckRemovedFromYardData {
            vin,
            occurred_at: Utc::now(),
        })
    }

    pub fn returned_to_yard(vin: Vin, distance_traveled: i32) -> Self {
        Self::ReturnedToYard(TruckReturnedToYardData {
            vin,
            distance_traveled,
            occurred_at: Utc::now(),
        })
    }

    /// Returns the VIN of the truck this event belongs to.
    pub fn vin(&self) -> &Vin {
        match self {
            Self::Bought(data) => &data.vin,
            Self::SentForInspection(data) => &data.vin,
            Self::ReturnedFromInspection(data) => &data.vin,
            Self::RemovedFromYard(data) => &data.vin,
            Self::ReturnedToYard(data) => &data.vin,
        }
    }
}

impl DomainEvent for FleetTruckEvent {
    fn event_type(&self) -> &'static str {
        match self {
            Self::Bought(_) => "TruckBought",
            Self::SentForInspection(_) => "TruckSentForInspection",
            Self::ReturnedFromInspection(_) => "TruckReturnedFromInspection",
            Self::RemovedFromYard(_) => "TruckRemovedFromYard",
            Self::ReturnedToYard(_) => "TruckReturnedToYard",
        }
    }

    fn payload(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            Self::Bought(data) => serde_json::to_value(data),
            Self::SentForInspection(data) => serde_json::to_value(data),
            Self::ReturnedFromInspection(data) => serde_json::to_value(data),
            Self::RemovedFromYard(data) => serde_json::to_value(data),
            Self::ReturnedToYard(data) => serde_json::to_value(data),
        }
    }

    fn codec() -> EventCodec<Self> {
        EventCodec::new()
            .with("TruckBought", |p| {
                Ok(Self::Bought(serde_json::from_value(p)?))
            })
            .with("TruckSentForInspection", |p| {
                Ok(Self::SentForInspection(serde_json::from_value(p)?))
            })
            .with("TruckReturnedFromInspection", |p| {
                Ok(Self::ReturnedFromInspection(serde_json::from_value(p)?))
            })
            .with("TruckRemovedFromYard", |p| {
                Ok(Self::RemovedFromYard(serde_json::from_value(p)?))
            })
            .with("TruckReturnedToYard", |p| {
                Ok(Self::ReturnedToYard(serde_json::from_value(p)?))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_covers_every_variant() {
        assert_eq!(FleetTruckEvent::codec().decoder_count(), 5);
    }

    #[test]
    fn events_survive_the_codec() {
        let codec = FleetTruckEvent::codec();
        let vin = Vin::new("test-0001");
        let events = vec![
            FleetTruckEvent::bought(vin.clone(), MakeModel::new("TruckCo", "The Big One"), 1000),
            FleetTruckEvent::sent_for_inspection(vin.clone()),
            FleetTruckEvent::returned_from_inspection(vin.clone(), "ok", 1200),
            FleetTruckEvent::removed_from_yard(vin.clone()),
            FleetTruckEvent::returned_to_yard(vin, 500),
        ];

        for event in events {
            let (tag, payload) = codec.encode(&event).unwrap();
            let decoded = codec.decode(tag, payload).unwrap();
            assert_eq!(decoded, event);
        }
    }
}
