//! NOAA Climate Data Online lookup
//!
//! Best-effort: a single GET with a bounded timeout and no retries. Every
//! failure is turned into [`LookupOutcome::Absent`] so callers always have a
//! defined fallback path.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::config::NoaaConfig;
use crate::models::Coordinate;
use crate::{ClimateError, Result};

/// Unparsed JSON document returned by the climate data service
#[derive(Debug, Clone, PartialEq)]
pub struct RawClimatePayload(Value);

impl RawClimatePayload {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// `null`, `false`, zero and empty documents carry no data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Number(n) => n.as_f64() == Some(0.0),
            Value::Object(map) => map.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::String(s) => s.is_empty(),
        }
    }
}

/// Why no climate data was obtained
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbsentReason {
    #[error("lookup disabled")]
    Disabled,
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("empty response")]
    Empty,
}

/// Result of an external climate lookup
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(RawClimatePayload),
    Absent(AbsentReason),
}

/// Source of externally provided climate data
#[async_trait]
pub trait ClimateLookup: Send + Sync {
    async fn fetch(&self, coordinate: Coordinate) -> LookupOutcome;
}

/// NOAA CDO web service client
pub struct NoaaClient {
    client: Client,
    endpoint: Url,
    dataset_id: String,
    token: Option<String>,
    enabled: bool,
}

impl NoaaClient {
    pub fn from_config(config: &NoaaConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.base_url)
            .map_err(|e| ClimateError::config(format!("Invalid NOAA base URL: {e}")))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("climate-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClimateError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            dataset_id: config.dataset_id.clone(),
            token: config.token.clone(),
            enabled: config.enabled,
        })
    }

    fn request_url(&self, coordinate: Coordinate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("datasetid", &self.dataset_id)
            .append_pair(
                "locationid",
                &format!("ZIP:{},{}", coordinate.latitude, coordinate.longitude),
            );
        url
    }

    async fn request(
        &self,
        coordinate: Coordinate,
    ) -> std::result::Result<RawClimatePayload, AbsentReason> {
        let mut request = self.client.get(self.request_url(coordinate));
        if let Some(token) = &self.token {
            request = request.header("token", token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AbsentReason::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AbsentReason::Status(status.as_u16()));
        }

        let payload = response
            .json::<Value>()
            .await
            .map(RawClimatePayload::new)
            .map_err(|e| AbsentReason::Malformed(e.to_string()))?;

        if payload.is_empty() {
            return Err(AbsentReason::Empty);
        }
        Ok(payload)
    }
}

#[async_trait]
impl ClimateLookup for NoaaClient {
    #[instrument(name = "noaa_lookup", skip(self))]
    async fn fetch(&self, coordinate: Coordinate) -> LookupOutcome {
        if !self.enabled {
            debug!("NOAA lookup disabled");
            return LookupOutcome::Absent(AbsentReason::Disabled);
        }

        match self.request(coordinate).await {
            Ok(payload) => {
                debug!("NOAA returned climate data");
                LookupOutcome::Found(payload)
            }
            Err(reason) => {
                warn!("NOAA API error: {}", reason);
                LookupOutcome::Absent(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const COORDINATE: Coordinate = Coordinate {
        latitude: 40.5,
        longitude: -75.25,
    };

    fn client_for(server: &MockServer, token: Option<&str>) -> NoaaClient {
        let config = NoaaConfig {
            enabled: true,
            base_url: format!("{}/cdo-web/api/v2/data", server.uri()),
            dataset_id: "NORMAL_ANN".to_string(),
            token: token.map(str::to_string),
            timeout_seconds: 1,
        };
        NoaaClient::from_config(&config).unwrap()
    }

    #[tokio::test]
    async fn test_found_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cdo-web/api/v2/data"))
            .and(query_param("datasetid", "NORMAL_ANN"))
            .and(query_param("locationid", "ZIP:40.5,-75.25"))
            .and(header("token", "cdo-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"results": [{"value": 1}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server, Some("cdo-token")).fetch(COORDINATE).await;
        assert_eq!(
            outcome,
            LookupOutcome::Found(RawClimatePayload::new(json!({"results": [{"value": 1}]})))
        );
    }

    #[tokio::test]
    async fn test_absent_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let outcome = client_for(&server, None).fetch(COORDINATE).await;
        assert_eq!(outcome, LookupOutcome::Absent(AbsentReason::Status(503)));
    }

    #[tokio::test]
    async fn test_absent_on_empty_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let outcome = client_for(&server, None).fetch(COORDINATE).await;
        assert_eq!(outcome, LookupOutcome::Absent(AbsentReason::Empty));
    }

    #[tokio::test]
    async fn test_absent_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server, None).fetch(COORDINATE).await;
        assert!(matches!(
            outcome,
            LookupOutcome::Absent(AbsentReason::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_absent_on_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"results": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server, None).fetch(COORDINATE).await;
        assert!(matches!(
            outcome,
            LookupOutcome::Absent(AbsentReason::Network(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
            .expect(0)
            .mount(&server)
            .await;

        let config = NoaaConfig {
            enabled: false,
            base_url: server.uri(),
            ..NoaaConfig::default()
        };
        let outcome = NoaaClient::from_config(&config).unwrap().fetch(COORDINATE).await;
        assert_eq!(outcome, LookupOutcome::Absent(AbsentReason::Disabled));
    }

    #[test]
    fn test_payload_emptiness() {
        assert!(RawClimatePayload::new(Value::Null).is_empty());
        assert!(RawClimatePayload::new(json!([])).is_empty());
        assert!(!RawClimatePayload::new(json!({"metadata": {}})).is_empty());
        assert!(RawClimatePayload::new(json!(0)).is_empty());
        assert!(!RawClimatePayload::new(json!(true)).is_empty());
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let config = NoaaConfig {
            base_url: "not a url".to_string(),
            ..NoaaConfig::default()
        };
        assert!(matches!(
            NoaaClient::from_config(&config),
            Err(ClimateError::Config { .. })
        ));
    }
}
