//! Application layer for Sportlocate
//!
//! Owns the service instances, runs catalog and weather requests in the
//! background and keeps the map and weather view state.

pub mod context;
mod error_mapping;
pub mod models;
pub mod services;

pub use context::AppContext;
pub use models::{MapEvent, MapModel, VenueRecord, WeatherModel};
pub use services::{
    VenueServiceError, VenueServiceMessage, WeatherError, WeatherServiceMessage,
};
