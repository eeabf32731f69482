//! End-to-end: HTTP fetch against a mock server, then normalization.

use serde_json::json;
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::provider::{CURRENT_CHANNELS, DAILY_CHANNELS, HOURLY_CHANNELS};
use skycast_core::{Coordinates, ForecastProvider, OpenMeteoProvider, WeatherError, normalize};

const BASE: i64 = 1_749_945_600; // 2025-06-15 00:00:00 UTC
const HOUR: i64 = 3600;
const DAY: i64 = 86_400;

fn rome() -> Coordinates {
    Coordinates {
        latitude: 41.89193,
        longitude: 12.51133,
    }
}

fn forecast_body() -> serde_json::Value {
    json!([{
        "latitude": 41.89193,
        "longitude": 12.51133,
        "utc_offset_seconds": 7200,
        "current": {
            "time": BASE,
            "interval": 900,
            "temperature_2m": 15.34,
            "relative_humidity_2m": 62.0,
            "apparent_temperature": 14.2,
            "precipitation": 0.0,
            "rain": 0.0,
            "weather_code": 2.0,
            "cloud_cover": 35.0,
            "wind_speed_10m": 12.96,
            "wind_direction_10m": 200.0,
            "pressure_msl": 1013.25,
            "is_day": 1.0
        },
        "hourly": {
            "time": BASE,
            "time_end": BASE + 2 * HOUR,
            "interval": HOUR,
            "temperature_2m": [15.0, 15.5],
            "precipitation_probability": [5.0, 10.0],
            "precipitation": [0.0, 0.0],
            "weather_code": [1.0, 2.0],
            "relative_humidity_2m": [60.0, 58.0],
            "wind_speed_10m": [10.0, 11.0],
            "is_day": [1.0, 1.0]
        },
        "daily": {
            "time": BASE,
            "time_end": BASE + DAY,
            "interval": DAY,
            "weather_code": [3.0],
            "temperature_2m_max": [21.9],
            "temperature_2m_min": [12.0],
            "precipitation_sum": [0.4],
            "relative_humidity_2m_max": [80.0],
            "relative_humidity_2m_min": [40.0],
            "wind_speed_10m_max": [18.3],
            "sunrise": [BASE + 4 * HOUR],
            "sunset": [BASE + 19 * HOUR]
        }
    }])
}

#[tokio::test]
async fn fetches_and_normalizes_a_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("forecast_days", "7"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenMeteoProvider::with_base_url(server.uri());
    let raw = provider.fetch_forecast(rome()).await.expect("fetch");
    let snapshot = normalize::normalize(&raw).expect("normalize");

    assert_eq!(snapshot.current.temperature_2m, 15.3);
    assert_eq!(snapshot.current.weather_code, 2);
    assert!(snapshot.current.is_day);
    assert_eq!(snapshot.hourly.len(), 2);
    assert_eq!(snapshot.daily.len(), 1);
    assert_eq!(snapshot.daily.precipitation_sum, vec![0.4]);
}

#[tokio::test]
async fn request_channel_lists_follow_the_tables() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("latitude", "41.89193"))
        .and(query_param("longitude", "12.51133"))
        .and(query_param("current", CURRENT_CHANNELS.join(",")))
        .and(query_param("hourly", HOURLY_CHANNELS.join(",")))
        .and(query_param("daily", DAILY_CHANNELS.join(",")))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .expect(1)
        .mount(&server)
        .await;

    let provider = OpenMeteoProvider::with_base_url(server.uri());
    provider.fetch_forecast(rome()).await.expect("fetch");
}

#[tokio::test]
async fn empty_response_array_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let provider = OpenMeteoProvider::with_base_url(server.uri());
    let err = provider.fetch_forecast(rome()).await.unwrap_err();
    assert!(matches!(err, WeatherError::EmptyResponse));
}

#[tokio::test]
async fn http_failures_map_to_network_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = OpenMeteoProvider::with_base_url(server.uri());
    let err = provider.fetch_forecast(rome()).await.unwrap_err();
    assert!(matches!(err, WeatherError::Network(_)));
}
