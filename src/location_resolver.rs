//! Location Resolution Module
//!
//! This module turns a validated ZIP code into approximate coordinates. When a
//! geocoder is configured it is asked first; otherwise, or when it fails, the
//! ZIP range heuristic below is used.

use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::geocoding::OpenCageGeocoder;
use crate::models::{Coordinate, ZipCode};
use crate::Result;

/// Estimate coordinates from the numeric range of a ZIP code.
///
/// This is a deliberately rough heuristic, not geocoding. Bands are checked in
/// order; the Mountain/West band is tested before the West Coast catch-all,
/// which therefore only covers 70000..80000.
pub fn estimate_coordinates(zip: &ZipCode) -> Result<Coordinate> {
    let zip_num = zip.numeric()?;
    let t = f64::from(zip_num) / 10_000.0;

    let (latitude, longitude) = match zip_num {
        // East Coast
        0..30_000 => (40.0 + t * 5.0, -75.0 - t * 10.0),
        // South
        30_000..50_000 => (35.0 + t * 5.0, -85.0 - t * 5.0),
        // Midwest
        50_000..70_000 => (40.0 + t * 5.0, -90.0 - t * 5.0),
        // Mountain/West
        80_000.. => (38.0 + t * 3.0, -105.0 - t * 5.0),
        // West Coast
        _ => (34.0 + t * 2.0, -118.0 - t * 2.0),
    };

    Ok(Coordinate::new(latitude, longitude))
}

/// Service for resolving ZIP codes to coordinates
pub struct LocationResolver {
    geocoder: Option<OpenCageGeocoder>,
}

impl LocationResolver {
    #[must_use]
    pub fn new(geocoder: Option<OpenCageGeocoder>) -> Self {
        Self { geocoder }
    }

    /// Build a resolver, enabling geocoding only when an API key is configured
    pub fn from_config(config: &GeocodingConfig) -> Result<Self> {
        Ok(Self::new(OpenCageGeocoder::from_config(config)?))
    }

    #[must_use]
    pub fn has_geocoder(&self) -> bool {
        self.geocoder.is_some()
    }

    /// Resolve a ZIP code, falling back to the range estimate on any geocoding failure
    #[instrument(skip(self, zip), fields(zip = %zip))]
    pub async fn resolve(&self, zip: &ZipCode) -> Result<Coordinate> {
        if let Some(geocoder) = &self.geocoder {
            match geocoder.geocode(zip).await {
                Ok(coordinate) => {
                    debug!("Geocoded {} to {}", zip, coordinate.format_coordinates());
                    return Ok(coordinate);
                }
                Err(e) => {
                    warn!("Geocoding failed for {}: {}, using ZIP range estimate", zip, e);
                }
            }
        }

        let coordinate = estimate_coordinates(zip)?;
        debug!("Estimated {} at {}", zip, coordinate.format_coordinates());
        Ok(coordinate)
    }
}
