//! Configuration management for the climate service
//!
//! Handles loading configuration from a TOML file and environment variables,
//! and validates every setting before the server starts.

use crate::ClimateError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Prefix for environment variable overrides, e.g. `CLIMATE__SERVER__PORT`
const ENV_PREFIX: &str = "CLIMATE";

/// Root configuration structure for the climate service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateServiceConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// NOAA climate data lookup settings
    pub noaa: NoaaConfig,
    /// Optional forward geocoding settings
    pub geocoding: GeocodingConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// TCP port to bind
    pub port: u16,
}

/// NOAA Climate Data Online settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoaaConfig {
    /// Whether to attempt the NOAA lookup at all
    pub enabled: bool,
    /// Data endpoint URL
    pub base_url: String,
    /// Dataset requested from the data endpoint
    pub dataset_id: String,
    /// CDO web service token, sent as the `token` header
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// OpenCage geocoding settings. Geocoding is skipped without an API key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    /// OpenCage API key
    pub api_key: Option<String>,
    /// Base URL for the OpenCage API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_noaa_base_url() -> String {
    "https://www.ncei.noaa.gov/cdo-web/api/v2/data".to_string()
}

fn default_noaa_dataset() -> String {
    "NORMAL_ANN".to_string()
}

fn default_timeout() -> u32 {
    10
}

fn default_geocoding_base_url() -> String {
    "https://api.opencagedata.com".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for NoaaConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_noaa_base_url(),
            dataset_id: default_noaa_dataset(),
            token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

impl NoaaConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.into())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl ClimateServiceConfig {
    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ClimateServiceConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("climate-service").join("config.toml"))
    }

    /// Socket address string for the HTTP listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.port == 0 {
            self.server.port = default_port();
        }
        if self.noaa.base_url.is_empty() {
            self.noaa.base_url = default_noaa_base_url();
        }
        if self.noaa.dataset_id.is_empty() {
            self.noaa.dataset_id = default_noaa_dataset();
        }
        if self.noaa.timeout_seconds == 0 {
            self.noaa.timeout_seconds = default_timeout();
        }
        if self.noaa.token.as_deref().is_some_and(str::is_empty) {
            self.noaa.token = None;
        }
        if self.geocoding.base_url.is_empty() {
            self.geocoding.base_url = default_geocoding_base_url();
        }
        if self.geocoding.timeout_seconds == 0 {
            self.geocoding.timeout_seconds = default_timeout();
        }
        if self.geocoding.api_key.as_deref().is_some_and(str::is_empty) {
            self.geocoding.api_key = None;
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.noaa.timeout_seconds > 300 {
            return Err(ClimateError::config("NOAA timeout cannot exceed 300 seconds").into());
        }

        if self.geocoding.timeout_seconds > 300 {
            return Err(
                ClimateError::config("Geocoding timeout cannot exceed 300 seconds").into(),
            );
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ClimateError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ClimateError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("NOAA", &self.noaa.base_url),
            ("Geocoding", &self.geocoding.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ClimateError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
