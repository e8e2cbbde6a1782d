//! `climate-service` - outdoor design temperatures for US ZIP codes
//!
//! This library provides the ZIP-to-coordinate estimate, the design
//! temperature estimator, the best-effort NOAA lookup and the HTTP API that
//! composes them for downstream HVAC load calculations.

pub mod api;
pub mod config;
pub mod design_temperature;
pub mod error;
pub mod geocoding;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod noaa;
pub mod service;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::ClimateServiceConfig;
pub use design_temperature::estimate_design_temperatures;
pub use error::ClimateError;
pub use location_resolver::{LocationResolver, estimate_coordinates};
pub use models::{ClimateRecord, ClimateSource, Coordinate, DesignTemperatures, ZipCode};
pub use noaa::{ClimateLookup, LookupOutcome, NoaaClient};
pub use service::ClimateService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ClimateError>;
