//! Data models for the climate service
//!
//! - Location: validated ZIP codes and coordinates
//! - Climate: design temperatures and the response record

pub mod climate;
pub mod location;

pub use climate::{ClimateRecord, ClimateSource, DesignTemperatures};
pub use location::{Coordinate, INVALID_ZIP_MESSAGE, ZipCode};
