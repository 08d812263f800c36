//! Centralized error types for the Sportlocate application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for a non-fatal UI notice
//! - Preserves full error context for debugging/logging

use thiserror::Error;

use crate::api_client::ApiError;

/// Top-level application error type.
///
/// Every crate-level error converts into this type. Use `user_message()`
/// to get a UI-appropriate message; none of these errors end the process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Venue catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Preferences error: {0}")]
    Preferences(#[from] PreferencesError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Catalog(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Preferences(e) => e.user_message(),
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Unavailable { url, message, .. } => {
                AppError::Network(NetworkError::ConnectionFailed(format!("{}: {}", url, message)))
            }
            ApiError::Parse { message, .. } => {
                AppError::Network(NetworkError::InvalidResponse(message))
            }
            ApiError::InvalidUrl(s) => AppError::Config(ConfigError::Invalid(s)),
            ApiError::Client(s) => AppError::Network(NetworkError::TlsError(s)),
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("TLS/SSL error: {0}")]
    TlsError(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
            NetworkError::TlsError(_) => "Secure connection failed. Check your network settings.",
        }
    }
}

/// Venue catalog errors as seen by the UI.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Unknown city: {0}")]
    UnknownCity(String),

    #[error("Malformed catalog data: {0}")]
    InvalidData(String),

    #[error("City code table error: {0}")]
    CityTable(String),

    #[error("Unsupported venue kind: {0}")]
    UnsupportedKind(String),
}

impl CatalogError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::Unavailable(_) => {
                "Venue service is unavailable. Please try again later."
            }
            CatalogError::UnknownCity(_) => "City not recognised. Pick a city from the list.",
            CatalogError::InvalidData(_) => "Venue data could not be read. Please try again.",
            CatalogError::CityTable(_) => "City list could not be loaded. Check your settings.",
            CatalogError::UnsupportedKind(_) => "This kind of venue is not supported.",
        }
    }
}

/// Weather service errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Weather API error: {0}")]
    ApiError(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => {
                "Weather unavailable: the city could not be located."
            }
            WeatherError::ApiError(_) => "Weather service error. Please try again.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}

/// Preference store errors.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("Failed to read preferences: {0}")]
    Read(String),

    #[error("Failed to write preferences: {0}")]
    Write(String),
}

impl PreferencesError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PreferencesError::Read(_) => "Saved preferences could not be read. Using defaults.",
            PreferencesError::Write(_) => "Preferences could not be saved. Please try again.",
        }
    }
}
