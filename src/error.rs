//! Error types and handling for the climate service

use thiserror::Error;

/// Main error type for the climate service
#[derive(Error, Debug)]
pub enum ClimateError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("{message}")]
    General { message: String },
}

impl ClimateError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the caller's input
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, ClimateError::Validation { .. })
    }

    /// Message suitable for the `detail` field of an HTTP error body
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ClimateError::Validation { message } => message.clone(),
            other => format!("Error fetching climate data: {other}"),
        }
    }
}
