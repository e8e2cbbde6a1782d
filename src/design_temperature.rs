//! Outdoor design temperature estimation
//!
//! Rough linear estimate from latitude plus a coastal adjustment by longitude
//! band, clamped to plausible US ranges. Used whenever no external climate data
//! is available.

use std::ops::RangeInclusive;

use crate::models::{Coordinate, DesignTemperatures};

const BASE_SUMMER_F: f64 = 85.0;
const BASE_WINTER_F: f64 = 30.0;

/// Latitude at which no latitude adjustment applies
const REFERENCE_LATITUDE: f64 = 35.0;
/// Winter degrees °F per degree of latitude away from the reference
const LATITUDE_FACTOR: f64 = 1.5;
/// Fraction of the winter latitude adjustment applied to summer
const SUMMER_LATITUDE_SHARE: f64 = 0.3;

/// West of this longitude counts as Pacific coast
const PACIFIC_LONGITUDE: f64 = -120.0;
/// East of this longitude counts as Atlantic coast
const ATLANTIC_LONGITUDE: f64 = -80.0;

pub const SUMMER_RANGE_F: RangeInclusive<f64> = 75.0..=105.0;
pub const WINTER_RANGE_F: RangeInclusive<f64> = -20.0..=50.0;

/// Estimate summer and winter design temperatures for a coordinate
#[must_use]
pub fn estimate_design_temperatures(coordinate: Coordinate) -> DesignTemperatures {
    let mut summer = BASE_SUMMER_F;
    let mut winter = BASE_WINTER_F;

    let lat_adjustment = (coordinate.latitude - REFERENCE_LATITUDE) * LATITUDE_FACTOR;
    winter -= lat_adjustment;
    summer -= lat_adjustment * SUMMER_LATITUDE_SHARE;

    if coordinate.longitude < PACIFIC_LONGITUDE {
        winter += 10.0;
        summer -= 5.0;
    } else if coordinate.longitude > ATLANTIC_LONGITUDE {
        winter -= 5.0;
    }

    DesignTemperatures::new(
        round_tenth(clamp_to(summer, &SUMMER_RANGE_F)),
        round_tenth(clamp_to(winter, &WINTER_RANGE_F)),
    )
}

// NaN clamps to the lower bound so the result is always in range.
fn clamp_to(value: f64, range: &RangeInclusive<f64>) -> f64 {
    if value.is_nan() {
        *range.start()
    } else {
        value.clamp(*range.start(), *range.end())
    }
}

// Rounds the exact binary value, exact ties to even.
fn round_tenth(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}
