//! Location models: validated ZIP codes and geographic coordinates

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::{ClimateError, Result};

/// Message returned to callers for any malformed ZIP code
pub const INVALID_ZIP_MESSAGE: &str = "Invalid ZIP code format";

/// A 5-digit US ZIP code.
///
/// The original string is kept as-is so leading zeros survive ("02134" stays
/// "02134"). The numeric value is only derived for range comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    /// Number of digits in a ZIP code
    pub const LENGTH: usize = 5;

    /// Validate a raw ZIP string: exactly five ASCII decimal digits
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.len() == Self::LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ClimateError::validation(INVALID_ZIP_MESSAGE))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the ZIP code, for range comparisons only
    pub fn numeric(&self) -> Result<u32> {
        self.0.parse::<u32>().map_err(|e| {
            ClimateError::general(format!("invalid numeric ZIP code '{}': {e}", self.0))
        })
    }
}

impl FromStr for ZipCode {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ZipCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Geographic coordinates in decimal degrees
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinate {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Whether both components are finite and within the valid degree ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}
