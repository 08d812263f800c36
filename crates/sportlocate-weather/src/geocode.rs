//! Forward geocoding: convert a city name to coordinates.
//! Uses Nominatim (OpenStreetMap) search - free, no API key required.

use serde::Deserialize;
use sportlocate_core::ApiClient;

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

/// City name to `(latitude, longitude)` lookup.
#[derive(Debug, Clone)]
pub struct Geocoder {
    client: ApiClient,
}

impl Geocoder {
    /// `client` must point at a Nominatim base URL and carry an identifying user agent.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Geocode `city_name` to `(latitude, longitude)`.
    /// Returns `None` on failure or when nothing matches; the caller reports
    /// weather as unavailable.
    pub async fn geocode(&self, city_name: &str) -> Option<(f64, f64)> {
        let query = city_name.trim();
        if query.is_empty() {
            return None;
        }

        let body = match self
            .client
            .get(
                "/search",
                Some(&[("q", query), ("format", "json"), ("limit", "1")]),
            )
            .await
        {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Geocode request failed: {}", e);
                return None;
            }
        };

        let places: Vec<NominatimPlace> = match serde_json::from_value(body) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!("Geocode parse error: {}", e);
                return None;
            }
        };

        let place = places.into_iter().next()?;
        let latitude = place.lat.parse::<f64>().ok()?;
        let longitude = place.lon.parse::<f64>().ok()?;

        tracing::info!("Geocoded {} to {}, {}", query, latitude, longitude);
        Some((latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sportlocate_core::RetryConfig;

    #[tokio::test]
    async fn test_blank_city_is_not_looked_up() {
        // Unroutable base: any request would fail, so None must come from the guard.
        let client = ApiClient::new("http://127.0.0.1:9", RetryConfig::new(1, 1)).unwrap();
        let geocoder = Geocoder::new(client);
        assert_eq!(geocoder.geocode("   ").await, None);
    }

    #[test]
    fn test_place_reads_only_coordinates() {
        let places: Vec<NominatimPlace> = serde_json::from_value(serde_json::json!([
            {"lat": "61.4978", "lon": "23.7610", "display_name": "Tampere, Finland"},
            {"lat": "60.1699", "lon": "24.9384"}
        ]))
        .unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].lat, "61.4978");
        assert_eq!(places[1].lon, "24.9384");
    }
}
