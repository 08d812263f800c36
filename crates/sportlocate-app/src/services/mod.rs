pub mod venue_service;
pub mod weather_service;

pub use venue_service::{
    request_recommendation, request_show_venues, VenueServiceError, VenueServiceMessage,
};
pub use weather_service::{
    request_fetch as request_weather_fetch, WeatherError, WeatherServiceMessage,
};
