use serde::{Deserialize, Serialize};

/// Vehicle identification number.
///
/// Identifies a single truck across both the fleet and rental perspectives.
/// Wraps a string to prevent mixing VINs up with other string-based
/// identifiers, and orders lexicographically so VIN-sorted reads come out
/// ascending.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vin(String);

impl Vin {
    /// Creates a VIN from a string.
    pub fn new(vin: impl Into<String>) -> Self {
        Self(vin.into())
    }

    /// Returns the VIN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Vin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Vin {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Vin {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for Vin {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Make and model of a truck, resolved through external lookup services.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MakeModel {
    pub make: String,
    pub model: String,
}

impl MakeModel {
    /// Creates a make/model pair.
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
        }
    }
}

impl std::fmt::Display for MakeModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.make, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vin_ordering_is_lexicographic() {
        let a = Vin::new("test-0001");
        let b = Vin::new("test-0002");
        assert!(a < b);
    }

    #[test]
    fn vin_serialization_roundtrip() {
        let vin = Vin::new("test-0001");
        let json = serde_json::to_string(&vin).unwrap();
        assert_eq!(json, "\"test-0001\"");
        let deserialized: Vin = serde_json::from_str(&json).unwrap();
        assert_eq!(vin, deserialized);
    }

    #[test]
    fn make_model_display() {
        let mm = MakeModel::new("TruckCo", "The Big One");
        assert_eq!(mm.to_string(), "TruckCo The Big One");
    }
}
