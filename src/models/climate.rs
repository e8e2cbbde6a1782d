//! Climate models: design temperatures and the per-request climate record

use serde::{Deserialize, Serialize};

use super::location::{Coordinate, ZipCode};

/// Where the design temperatures of a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClimateSource {
    /// Computed locally from coordinates
    #[default]
    Estimated,
    /// Returned by the NOAA climate data service
    Noaa,
}

impl ClimateSource {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Estimated => "estimated",
            Self::Noaa => "noaa",
        }
    }
}

/// Summer and winter outdoor design temperatures in °F
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignTemperatures {
    pub summer: f64,
    pub winter: f64,
}

impl DesignTemperatures {
    /// Placeholder values used while NOAA payloads are not parsed yet
    pub const NOAA_PLACEHOLDER: Self = Self {
        summer: 90.0,
        winter: 20.0,
    };

    #[must_use]
    pub fn new(summer: f64, winter: f64) -> Self {
        Self { summer, winter }
    }
}

/// Climate data returned for a single ZIP code request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateRecord {
    pub zip_code: String,
    pub summer_design_temp: f64,
    pub winter_design_temp: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub source: ClimateSource,
}

impl ClimateRecord {
    #[must_use]
    pub fn new(
        zip_code: &ZipCode,
        coordinate: Coordinate,
        temperatures: DesignTemperatures,
        source: ClimateSource,
    ) -> Self {
        Self {
            zip_code: zip_code.as_str().to_string(),
            summer_design_temp: temperatures.summer,
            winter_design_temp: temperatures.winter,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            source,
        }
    }
}
