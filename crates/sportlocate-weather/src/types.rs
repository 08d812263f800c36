use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sportlocate_core::ApiError;

/// Coarse weather buckets derived from WMO weather codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherClass {
    ClearSky,
    PartlyCloudy,
    Foggy,
    Rain,
    Snow,
    Thunderstorm,
    Unclassified,
}

/// WMO codes per class. The sets are disjoint; anything else is `Unclassified`.
/// See: https://open-meteo.com/en/docs#weathervariables
const CODE_TABLE: &[(WeatherClass, &[i32])] = &[
    (WeatherClass::ClearSky, &[0]),
    (WeatherClass::PartlyCloudy, &[1, 2, 3]),
    (WeatherClass::Foggy, &[45, 48]),
    (
        WeatherClass::Rain,
        &[51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 80, 81, 82],
    ),
    (WeatherClass::Snow, &[71, 73, 75, 77, 85, 86]),
    (WeatherClass::Thunderstorm, &[95, 96, 99]),
];

impl WeatherClass {
    /// Convert a WMO weather code to its class
    pub fn from_wmo_code(code: i32) -> Self {
        CODE_TABLE
            .iter()
            .find(|(_, codes)| codes.contains(&code))
            .map(|(class, _)| *class)
            .unwrap_or(Self::Unclassified)
    }

    /// Advisory shown next to the current weather
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky conditions. Enjoy the sunshine!",
            Self::PartlyCloudy => "Partly cloudy conditions.",
            Self::Foggy => "Foggy conditions. Drive safely and use headlights.",
            Self::Rain => "Rainy weather. Grab your raincoat or umbrella.",
            Self::Snow => "Snowfall expected. Bundle up and drive cautiously.",
            Self::Thunderstorm => "Thunderstorm alert. Stay indoors and away from windows.",
            Self::Unclassified => "",
        }
    }

    /// Fair weather admits every venue category; anything else only indoor ones.
    pub fn admits_all_categories(&self) -> bool {
        matches!(self, Self::ClearSky | Self::PartlyCloudy)
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Foggy => "Fog",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unclassified => "Unknown",
        }
    }
}

/// Raw current conditions as reported by the weather service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub windspeed: f64,
    pub weathercode: i32,
}

/// Classified weather for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub class: WeatherClass,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub windspeed: f64,
    pub raw_code: i32,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    pub fn advisory(&self) -> &'static str {
        self.class.advisory()
    }

    pub fn admits_all_categories(&self) -> bool {
        self.class.admits_all_categories()
    }
}

/// Classify raw conditions. Total: unknown codes become `Unclassified`.
pub fn classify(raw: &CurrentConditions) -> WeatherReport {
    WeatherReport {
        class: WeatherClass::from_wmo_code(raw.weathercode),
        latitude: raw.latitude,
        longitude: raw.longitude,
        temperature: raw.temperature,
        windspeed: raw.windspeed,
        raw_code: raw.weathercode,
        fetched_at: Utc::now(),
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Could not geocode city: {0}")]
    GeocodeUnavailable(String),
    #[error("Weather service error: {0}")]
    Service(#[from] ApiError),
    #[error("Parse error: {0}")]
    Parse(String),
}
