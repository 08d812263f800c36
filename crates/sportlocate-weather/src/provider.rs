use serde::Deserialize;
use sportlocate_core::ApiClient;

use crate::geocode::Geocoder;
use crate::types::{classify, CurrentConditions, WeatherError, WeatherReport};

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    latitude: f64,
    longitude: f64,
    current_weather: CurrentWeatherBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherBlock {
    temperature: f64,
    windspeed: f64,
    weathercode: i32,
}

/// Current weather from Open-Meteo, classified for recommendations.
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: ApiClient,
    geocoder: Geocoder,
}

impl WeatherProvider {
    pub fn new(client: ApiClient, geocoder: Geocoder) -> Self {
        Self { client, geocoder }
    }

    /// Geocode `city_name` and fetch its current weather.
    ///
    /// # Errors
    /// [`WeatherError::GeocodeUnavailable`] when the city cannot be located,
    /// otherwise the failures of [`Self::current_at`].
    pub async fn current_for_city(&self, city_name: &str) -> Result<WeatherReport, WeatherError> {
        let (latitude, longitude) = self
            .geocoder
            .geocode(city_name)
            .await
            .ok_or_else(|| WeatherError::GeocodeUnavailable(city_name.to_string()))?;

        self.current_at(latitude, longitude).await
    }

    /// Fetch and classify current weather at a coordinate.
    ///
    /// # Errors
    /// [`WeatherError::Service`] when the API stays unreachable,
    /// [`WeatherError::Parse`] when the forecast body lacks expected fields.
    pub async fn current_at(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, WeatherError> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        let params = [
            ("latitude", lat.as_str()),
            ("longitude", lon.as_str()),
            ("current_weather", "true"),
            ("timezone", "auto"),
        ];

        let body = self.client.get("/v1/forecast", Some(&params)).await?;
        let forecast: ForecastResponse =
            serde_json::from_value(body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        let report = classify(&CurrentConditions {
            latitude: forecast.latitude,
            longitude: forecast.longitude,
            temperature: forecast.current_weather.temperature,
            windspeed: forecast.current_weather.windspeed,
            weathercode: forecast.current_weather.weathercode,
        });

        tracing::info!(
            "Weather at {:.2}, {:.2}: {} ({}°C)",
            report.latitude,
            report.longitude,
            report.class.description(),
            report.temperature
        );
        Ok(report)
    }
}
