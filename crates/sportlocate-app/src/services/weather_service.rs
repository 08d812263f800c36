//! Weather backend: async weather fetching.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::mpsc::Sender;
use std::sync::Arc;

use sportlocate_weather::{WeatherError as ProviderError, WeatherProvider, WeatherReport};
use tokio::runtime::Handle;

/// Error type for weather operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    Network(String),
    Location(String),
    InvalidResponse(String),
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Network(s) => write!(f, "Weather error: {}", s),
            WeatherError::Location(s) => write!(f, "Location error: {}", s),
            WeatherError::InvalidResponse(s) => write!(f, "Weather response error: {}", s),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<ProviderError> for WeatherError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::GeocodeUnavailable(city) => WeatherError::Location(city),
            ProviderError::Service(api) => WeatherError::Network(api.to_string()),
            ProviderError::Parse(s) => WeatherError::InvalidResponse(s),
        }
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching the current weather
    FetchDone(Result<WeatherReport, WeatherError>),
}

/// Request the current weather of `city` asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &Sender<WeatherServiceMessage>,
    runtime: &Handle,
    provider: Arc<WeatherProvider>,
    city: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = provider.current_for_city(&city).await.map_err(|e| {
            tracing::warn!("Weather request for {} failed: {}", city, e);
            WeatherError::from(e)
        });
        let _ = tx.send(WeatherServiceMessage::FetchDone(result));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_error_display() {
        assert!(format!("{}", WeatherError::Network("timeout".into())).contains("Weather"));
        assert!(format!("{}", WeatherError::Location("Oz".into())).contains("Location"));
        assert!(format!("{}", WeatherError::InvalidResponse("x".into())).contains("response"));
    }

    #[test]
    fn provider_error_mapping() {
        assert_eq!(
            WeatherError::from(ProviderError::GeocodeUnavailable("Oz".into())),
            WeatherError::Location("Oz".into())
        );
        assert_eq!(
            WeatherError::from(ProviderError::Parse("missing field".into())),
            WeatherError::InvalidResponse("missing field".into())
        );
    }
}
