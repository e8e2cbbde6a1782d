//! OpenCage forward geocoding client
//!
//! Only constructed when an API key is configured. Every failure is reported
//! as an error so the caller can fall back to the ZIP range estimate.

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeocodingConfig;
use crate::models::{Coordinate, ZipCode};
use crate::{ClimateError, Result};

/// OpenCage geocoding API client
pub struct OpenCageGeocoder {
    client: Client,
    api_key: String,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

impl OpenCageGeocoder {
    /// Create a geocoder, or `None` when no API key is configured
    pub fn from_config(config: &GeocodingConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let endpoint = Url::parse(&format!(
            "{}/geocode/v1/json",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|e| ClimateError::config(format!("Invalid geocoding base URL: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("climate-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClimateError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Some(Self {
            client,
            api_key,
            endpoint,
        }))
    }

    /// Look up the coordinates of a US ZIP code
    #[instrument(skip(self, zip), fields(zip = %zip))]
    pub async fn geocode(&self, zip: &ZipCode) -> Result<Coordinate> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", zip.as_str())
            .append_pair("key", &self.api_key)
            .append_pair("countrycode", "us")
            .append_pair("limit", "1")
            .append_pair("no_annotations", "1");

        debug!("Calling the geocoding API");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClimateError::api(format!("Geocoding request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClimateError::api(format!("Geocoding API error: {status}")));
        }

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| ClimateError::api(format!("Failed to parse geocoding response: {e}")))?;

        let geometry = body
            .results
            .into_iter()
            .next()
            .map(|result| result.geometry)
            .ok_or_else(|| ClimateError::api(format!("No results found for ZIP code {zip}")))?;

        let coordinate = Coordinate::new(geometry.lat, geometry.lng);
        if !coordinate.is_valid() {
            return Err(ClimateError::api(format!(
                "Geocoding returned out-of-range coordinates {}",
                coordinate.format_coordinates()
            )));
        }

        Ok(coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn geocoder_for(server: &MockServer) -> OpenCageGeocoder {
        let config = GeocodingConfig {
            api_key: Some("test-key".to_string()),
            base_url: server.uri(),
            timeout_seconds: 2,
        };
        OpenCageGeocoder::from_config(&config).unwrap().unwrap()
    }

    #[test]
    fn test_no_api_key_disables_geocoding() {
        let config = GeocodingConfig::default();
        assert!(OpenCageGeocoder::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_geocode_reads_first_result() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geocode/v1/json"))
            .and(query_param("q", "02134"))
            .and(query_param("key", "test-key"))
            .and(query_param("countrycode", "us"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"geometry": {"lat": 42.3539, "lng": -71.1337}},
                    {"geometry": {"lat": 0.0, "lng": 0.0}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let zip = ZipCode::parse("02134").unwrap();
        let coordinate = geocoder_for(&server).geocode(&zip).await.unwrap();
        assert_eq!(coordinate, Coordinate::new(42.3539, -71.1337));
    }

    #[tokio::test]
    async fn test_geocode_empty_results_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": []
            })))
            .mount(&server)
            .await;

        let zip = ZipCode::parse("99999").unwrap();
        let err = geocoder_for(&server).geocode(&zip).await.unwrap_err();
        assert!(err.to_string().contains("No results found for ZIP code 99999"));
    }

    #[tokio::test]
    async fn test_geocode_http_error_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let zip = ZipCode::parse("10001").unwrap();
        let err = geocoder_for(&server).geocode(&zip).await.unwrap_err();
        assert!(matches!(err, ClimateError::Api { .. }));
    }
}
