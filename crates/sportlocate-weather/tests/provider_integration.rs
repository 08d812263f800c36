//! Integration tests for WeatherProvider and Geocoder using wiremock.

use sportlocate_core::{ApiClient, RetryConfig};
use sportlocate_weather::{Geocoder, WeatherClass, WeatherError, WeatherProvider};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), RetryConfig::new(3, 1)).unwrap()
}

fn forecast(code: i32) -> serde_json::Value {
    serde_json::json!({
        "latitude": 61.5,
        "longitude": 23.75,
        "current_weather": {
            "temperature": 12.5,
            "windspeed": 7.2,
            "weathercode": code
        }
    })
}

async fn mount_tampere(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Tampere"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"lat": "61.4980", "lon": "23.7603", "display_name": "Tampere, Finland"}
        ])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_geocode_parses_first_result() {
    let server = MockServer::start().await;
    mount_tampere(&server).await;

    let geocoder = Geocoder::new(client(&server));
    let (lat, lon) = geocoder.geocode("Tampere").await.unwrap();

    assert!((lat - 61.498).abs() < 1e-6);
    assert!((lon - 23.7603).abs() < 1e-6);
}

#[tokio::test]
async fn test_geocode_no_match_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let geocoder = Geocoder::new(client(&server));
    assert!(geocoder.geocode("Nowhereville").await.is_none());
}

#[tokio::test]
async fn test_current_for_city_classifies_weather() {
    let server = MockServer::start().await;
    mount_tampere(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("current_weather", "true"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast(71)))
        .expect(1)
        .mount(&server)
        .await;

    let provider = WeatherProvider::new(client(&server), Geocoder::new(client(&server)));
    let report = provider.current_for_city("Tampere").await.unwrap();

    assert_eq!(report.class, WeatherClass::Snow);
    assert_eq!(report.raw_code, 71);
    assert_eq!(report.temperature, 12.5);
    assert_eq!(report.windspeed, 7.2);
    assert_eq!(
        report.advisory(),
        "Snowfall expected. Bundle up and drive cautiously."
    );
}

#[tokio::test]
async fn test_unknown_city_is_geocode_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let provider = WeatherProvider::new(client(&server), Geocoder::new(client(&server)));
    let err = provider.current_for_city("Nowhereville").await.unwrap_err();

    assert!(matches!(err, WeatherError::GeocodeUnavailable(city) if city == "Nowhereville"));
}

#[tokio::test]
async fn test_forecast_missing_fields_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"latitude": 61.5})),
        )
        .mount(&server)
        .await;

    let provider = WeatherProvider::new(client(&server), Geocoder::new(client(&server)));
    let err = provider.current_at(61.5, 23.75).await.unwrap_err();

    assert!(matches!(err, WeatherError::Parse(_)));
}

#[tokio::test]
async fn test_forecast_outage_is_service_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let provider = WeatherProvider::new(client(&server), Geocoder::new(client(&server)));
    let err = provider.current_at(61.5, 23.75).await.unwrap_err();

    assert!(matches!(err, WeatherError::Service(ref e) if e.is_unavailable()));
}
