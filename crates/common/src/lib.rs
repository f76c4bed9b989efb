//! Shared identity types for the truck tracking system.

mod types;

pub use types::{MakeModel, Vin};
