//! Climate data composition
//!
//! Validates the ZIP code, resolves coordinates, tries the external lookup and
//! falls back to the local design temperature estimate when it yields nothing.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::ClimateServiceConfig;
use crate::design_temperature::estimate_design_temperatures;
use crate::location_resolver::LocationResolver;
use crate::models::{ClimateRecord, ClimateSource, DesignTemperatures, ZipCode};
use crate::noaa::{ClimateLookup, LookupOutcome, NoaaClient, RawClimatePayload};
use crate::Result;

/// Builds climate records for ZIP codes
pub struct ClimateService {
    resolver: LocationResolver,
    lookup: Arc<dyn ClimateLookup>,
}

impl ClimateService {
    #[must_use]
    pub fn new(resolver: LocationResolver, lookup: Arc<dyn ClimateLookup>) -> Self {
        Self { resolver, lookup }
    }

    pub fn from_config(config: &ClimateServiceConfig) -> Result<Self> {
        let resolver = LocationResolver::from_config(&config.geocoding)?;
        let lookup = Arc::new(NoaaClient::from_config(&config.noaa)?);
        Ok(Self::new(resolver, lookup))
    }

    /// Validate a raw ZIP string and build its climate record
    pub async fn climate_for_zip(&self, raw_zip: &str) -> Result<ClimateRecord> {
        let zip = ZipCode::parse(raw_zip)?;
        self.climate_for(&zip).await
    }

    #[instrument(skip(self, zip), fields(zip = %zip))]
    pub async fn climate_for(&self, zip: &ZipCode) -> Result<ClimateRecord> {
        let coordinate = self.resolver.resolve(zip).await?;

        let (temperatures, source) = match self.lookup.fetch(coordinate).await {
            LookupOutcome::Found(payload) => {
                (temperatures_from_noaa(&payload), ClimateSource::Noaa)
            }
            LookupOutcome::Absent(reason) => {
                debug!("No external climate data ({}), estimating", reason);
                (
                    estimate_design_temperatures(coordinate),
                    ClimateSource::Estimated,
                )
            }
        };

        info!(
            "Climate for {}: summer {}°F, winter {}°F ({})",
            zip,
            temperatures.summer,
            temperatures.winter,
            source.as_str()
        );

        Ok(ClimateRecord::new(zip, coordinate, temperatures, source))
    }
}

// TODO: extract real summer/winter design values once the NORMAL_ANN response
// schema of the CDO data endpoint is mapped; placeholders until then.
fn temperatures_from_noaa(_payload: &RawClimatePayload) -> DesignTemperatures {
    DesignTemperatures::NOAA_PLACEHOLDER
}
