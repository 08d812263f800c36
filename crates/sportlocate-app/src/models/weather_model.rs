//! Current weather as shown next to the map.

use sportlocate_core::AppError;
use sportlocate_weather::{WeatherClass, WeatherReport};

use crate::services::WeatherServiceMessage;

#[derive(Debug, Default)]
pub struct WeatherModel {
    loading: bool,
    error_message: String,
    report: Option<WeatherReport>,
}

impl WeatherModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn has_data(&self) -> bool {
        self.report.is_some()
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Latest report; kept when a later refresh fails.
    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn class(&self) -> Option<WeatherClass> {
        self.report.as_ref().map(|r| r.class)
    }

    pub fn temperature(&self) -> f64 {
        self.report.as_ref().map(|r| r.temperature).unwrap_or_default()
    }

    pub fn wind_speed(&self) -> f64 {
        self.report.as_ref().map(|r| r.windspeed).unwrap_or_default()
    }

    pub fn condition(&self) -> &'static str {
        self.report
            .as_ref()
            .map(|r| r.class.description())
            .unwrap_or_default()
    }

    /// Activity advice for the current weather.
    pub fn advisory(&self) -> &'static str {
        self.report.as_ref().map(|r| r.advisory()).unwrap_or_default()
    }

    pub fn begin_refresh(&mut self) {
        self.loading = true;
        self.error_message.clear();
    }

    pub fn apply(&mut self, message: WeatherServiceMessage) {
        match message {
            WeatherServiceMessage::FetchDone(Ok(report)) => {
                tracing::info!(
                    "Weather updated: {} ({:.1}°C)",
                    report.class.description(),
                    report.temperature
                );
                self.report = Some(report);
            }
            WeatherServiceMessage::FetchDone(Err(e)) => {
                tracing::error!("Failed to fetch weather: {}", e);
                self.error_message = AppError::from(e).user_message().to_string();
            }
        }
        self.loading = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::WeatherError;
    use sportlocate_weather::{classify, CurrentConditions};

    fn report(code: i32) -> WeatherReport {
        classify(&CurrentConditions {
            latitude: 61.5,
            longitude: 23.8,
            temperature: -3.5,
            windspeed: 4.0,
            weathercode: code,
        })
    }

    #[test]
    fn empty_model() {
        let model = WeatherModel::new();
        assert!(!model.has_data());
        assert_eq!(model.condition(), "");
        assert_eq!(model.advisory(), "");
        assert_eq!(model.temperature(), 0.0);
    }

    #[test]
    fn fetch_done_updates_report() {
        let mut model = WeatherModel::new();
        model.begin_refresh();
        assert!(model.loading());

        model.apply(WeatherServiceMessage::FetchDone(Ok(report(73))));
        assert!(!model.loading());
        assert_eq!(model.class(), Some(WeatherClass::Snow));
        assert_eq!(model.temperature(), -3.5);
        assert_eq!(model.advisory(), WeatherClass::Snow.advisory());
    }

    #[test]
    fn failed_refresh_keeps_last_report() {
        let mut model = WeatherModel::new();
        model.apply(WeatherServiceMessage::FetchDone(Ok(report(0))));
        model.begin_refresh();
        model.apply(WeatherServiceMessage::FetchDone(Err(WeatherError::Network(
            "timeout".into(),
        ))));

        assert_eq!(model.class(), Some(WeatherClass::ClearSky));
        assert!(!model.error_message().is_empty());
    }
}
