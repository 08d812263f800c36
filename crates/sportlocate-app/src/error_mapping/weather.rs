use crate::services::weather_service::WeatherError as ServiceWeatherError;
use sportlocate_core::{AppError, NetworkError, WeatherError};

impl From<ServiceWeatherError> for AppError {
    fn from(e: ServiceWeatherError) -> Self {
        match e {
            ServiceWeatherError::Network(s) => AppError::Weather(WeatherError::ApiError(s)),
            ServiceWeatherError::Location(s) => {
                AppError::Weather(WeatherError::LocationNotFound(s))
            }
            ServiceWeatherError::InvalidResponse(s) => {
                AppError::Network(NetworkError::InvalidResponse(s))
            }
        }
    }
}
