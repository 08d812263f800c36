//! Weather service for Sportlocate
//!
//! Geocodes a city, fetches its current weather from the Open-Meteo API and
//! classifies it into the buckets that drive venue recommendations.

pub mod geocode;
pub mod provider;
pub mod types;

pub use geocode::Geocoder;
pub use provider::WeatherProvider;
pub use types::*;
