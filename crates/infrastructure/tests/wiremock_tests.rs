//! Integration tests for the infrastructure adapters and the wired pipeline
//!
//! Every upstream (forecast, geocoding, air quality, language model) is
//! served by one wiremock server; each provider lives under its own path.

use std::sync::Arc;

use application::{SnapshotStore, error::ApplicationError, ports::AirQualityPort};
use domain::{AqiSource, DedupState, GeoLocation};
use infrastructure::{
    AppConfig, IqAirAdapter, OpenWeatherMapAdapter, build_active_location, build_update_service,
};
use secrecy::SecretString;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string_contains, header, method, path, query_param},
};

const GENERATED: &str = "Light rain is falling over New York at 28°C, so keep an umbrella handy.";

fn forecast_response() -> serde_json::Value {
    serde_json::json!({
        "latitude": 40.710335,
        "longitude": -73.99307,
        "utc_offset_seconds": -14400,
        "timezone": "America/New_York",
        "timezone_abbreviation": "EDT",
        "current": {
            "time": "2024-06-01T14:15",
            "interval": 900,
            "temperature_2m": 28.0,
            "relative_humidity_2m": 55,
            "apparent_temperature": 30.4,
            "precipitation": 1.2,
            "rain": 1.2,
            "snowfall": 0.0,
            "weather_code": 61,
            "cloud_cover": 92,
            "pressure_msl": 1009.8,
            "wind_speed_10m": 14.8,
            "wind_direction_10m": 210,
            "visibility": 12600.0,
            "is_day": 1
        },
        "daily": {
            "time": ["2024-06-01"],
            "sunrise": ["2024-06-01T05:26"],
            "sunset": ["2024-06-01T20:22"]
        }
    })
}

fn owm_response(index: u16) -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -74.006, "lat": 40.7128},
        "list": [{
            "main": {"aqi": index},
            "components": {
                "co": 280.37, "no": 0.2, "no2": 21.6, "o3": 98.71,
                "so2": 3.4, "pm2_5": 12.04, "pm10": 17.3, "nh3": 1.1
            },
            "dt": 1_717_264_800
        }]
    })
}

fn anthropic_response(text: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-haiku-20240307",
        "content": [{"type": "text", "text": text}],
        "usage": {"input_tokens": 412, "output_tokens": 23}
    })
}

/// Every provider pointed at the mock server, both AQI providers keyed
fn config_for(server: &MockServer) -> AppConfig {
    let uri = server.uri();
    let mut config = AppConfig::default();

    config.weather.base_url = uri.clone();
    config.weather.timeout_secs = 2;

    config.geocoding.forward_base_url = uri.clone();
    config.geocoding.bigdatacloud_base_url = uri.clone();
    config.geocoding.nominatim_base_url = uri.clone();
    config.geocoding.timeout_secs = 2;
    config.geocoding.cache_ttl_hours = 0;

    config.air_quality.iqair_api_key = Some(SecretString::from("iq-key"));
    config.air_quality.openweathermap_api_key = Some(SecretString::from("owm-key"));
    config.air_quality.iqair_base_url = uri.clone();
    config.air_quality.openweathermap_base_url = uri.clone();
    config.air_quality.timeout_secs = 2;

    config.llm.api_key = Some(SecretString::from("sk-ant-test"));
    config.llm.base_url = Some(uri);
    config.llm.timeout_ms = 2_000;

    config
}

async fn mount_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response()))
        .mount(server)
        .await;
}

async fn mount_iqair_failure(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v2/nearest_city"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(server)
        .await;
}

async fn mount_owm(server: &MockServer, index: u16) {
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owm_response(index)))
        .mount(server)
        .await;
}

async fn mount_bigdatacloud(server: &MockServer, city: &str) {
    Mock::given(method("GET"))
        .and(path("/data/reverse-geocode-client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "city": city,
            "locality": "",
            "countryCode": "US"
        })))
        .mount(server)
        .await;
}

async fn mount_anthropic(server: &MockServer, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "sk-ant-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_response(text)))
        .mount(server)
        .await;
}

fn new_york() -> GeoLocation {
    GeoLocation::new(40.7128, -74.0060).unwrap()
}

// ============================================================================
// Pipeline
// ============================================================================

#[tokio::test]
async fn coordinate_update_falls_back_to_secondary_aqi() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;
    mount_iqair_failure(&server).await;
    mount_owm(&server, 3).await;
    mount_bigdatacloud(&server, "New York").await;
    mount_anthropic(&server, GENERATED).await;

    let config = config_for(&server);
    let location = build_active_location(&config).unwrap();
    let store = Arc::new(SnapshotStore::new());
    let service = build_update_service(&config, location, store.clone()).unwrap();

    let published = service.trigger_update(Some(new_york())).await.unwrap();

    assert_eq!(published.city(), "New York");
    assert_eq!(published.country(), "US");
    assert_eq!(published.message.text, GENERATED);

    let report = &published.report;
    assert_eq!(report.get("condition").unwrap().to_string(), "Rain");
    assert_eq!(report.get("aqi").unwrap().to_string(), "3");
    assert_eq!(
        report.get("aqi_source").unwrap().to_string(),
        AqiSource::SecondaryProvider.as_str()
    );
    assert!(
        report
            .get("aqi_description")
            .unwrap()
            .to_string()
            .starts_with("Moderate (3)")
    );
    assert!(report.get("heat_index").is_some());
    assert_eq!(report.get("humidity").unwrap().to_string(), "55%");

    let latest = store.latest().unwrap();
    assert!(Arc::ptr_eq(&latest, &published));
}

#[tokio::test]
async fn prompt_carries_weather_data_and_system_prompt() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;
    mount_iqair_failure(&server).await;
    mount_owm(&server, 3).await;
    mount_bigdatacloud(&server, "New York").await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(body_string_contains("Current Weather Data:"))
        .and(body_string_contains("helpful AI weather assistant"))
        .respond_with(ResponseTemplate::new(200).set_body_json(anthropic_response(GENERATED)))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let location = build_active_location(&config).unwrap();
    let service =
        build_update_service(&config, location, Arc::new(SnapshotStore::new())).unwrap();

    service.trigger_update(Some(new_york())).await.unwrap();
}

#[tokio::test]
async fn named_location_uses_forward_geocoding() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;
    mount_iqair_failure(&server).await;
    mount_owm(&server, 2).await;
    mount_anthropic(&server, GENERATED).await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "New York"))
        .and(query_param("countryCode", "US"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "name": "New York",
                "latitude": 40.71427,
                "longitude": -74.00597,
                "country_code": "US"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.location.city = "New York".to_string();
    config.location.country = Some("us".to_string());
    let location = build_active_location(&config).unwrap();
    let service =
        build_update_service(&config, location, Arc::new(SnapshotStore::new())).unwrap();

    let published = service.trigger_update(None).await.unwrap();
    assert_eq!(published.city(), "New York");
    assert_eq!(published.country(), "US");
}

#[tokio::test]
async fn reverse_chain_falls_through_to_nominatim() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;
    mount_iqair_failure(&server).await;
    mount_owm(&server, 1).await;
    mount_anthropic(&server, GENERATED).await;
    mount_bigdatacloud(&server, "").await;

    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": {"town": "Hoboken", "country_code": "us"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let location = build_active_location(&config).unwrap();
    let service =
        build_update_service(&config, location, Arc::new(SnapshotStore::new())).unwrap();

    let published = service
        .trigger_update(Some(GeoLocation::new(40.744, -74.0324).unwrap()))
        .await
        .unwrap();
    assert_eq!(published.city(), "Hoboken");
    assert_eq!(published.country(), "US");
}

#[tokio::test]
async fn weather_outage_leaves_store_untouched() {
    let server = MockServer::start().await;
    mount_bigdatacloud(&server, "New York").await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let location = build_active_location(&config).unwrap();
    let store = Arc::new(SnapshotStore::new());
    let service = build_update_service(&config, location, store.clone()).unwrap();

    let result = service.trigger_update(Some(new_york())).await;
    assert!(matches!(result, Err(ApplicationError::Upstream(_))));
    assert!(store.latest().is_none());
}

#[tokio::test]
async fn repeated_generation_is_disambiguated() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;
    mount_iqair_failure(&server).await;
    mount_owm(&server, 3).await;
    mount_bigdatacloud(&server, "New York").await;
    mount_anthropic(&server, GENERATED).await;

    let config = config_for(&server);
    let location = build_active_location(&config).unwrap();
    let service =
        build_update_service(&config, location, Arc::new(SnapshotStore::new())).unwrap();

    let first = service.trigger_update(Some(new_york())).await.unwrap();
    let second = service.trigger_update(Some(new_york())).await.unwrap();

    assert_eq!(first.message.outcome, DedupState::Generated);
    assert_eq!(second.message.outcome, DedupState::Disambiguated);
    assert_ne!(first.message.text.trim(), second.message.text.trim());
    assert!(second.message.text.ends_with(GENERATED));
    assert_eq!(service.history_len().await, 2);
}

#[tokio::test]
async fn llm_failure_is_generation_error() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;
    mount_iqair_failure(&server).await;
    mount_owm(&server, 3).await;
    mount_bigdatacloud(&server, "New York").await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "type": "error",
            "error": {"type": "authentication_error", "message": "invalid x-api-key"}
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let location = build_active_location(&config).unwrap();
    let store = Arc::new(SnapshotStore::new());
    let service = build_update_service(&config, location, store.clone()).unwrap();

    let result = service.trigger_update(Some(new_york())).await;
    assert!(matches!(result, Err(ApplicationError::Generation(_))));
    assert!(store.latest().is_none());
    assert_eq!(service.history_len().await, 1);
}

// ============================================================================
// Air-quality adapters
// ============================================================================

#[tokio::test]
async fn iqair_adapter_normalizes_us_aqi() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/nearest_city"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "data": {"current": {"pollution": {
                "ts": "2024-06-01T18:00:00.000Z",
                "aqius": 45,
                "mainus": "p2",
                "p2": 10.4
            }}}
        })))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.air_quality.openweathermap_api_key = None;
    let adapter = IqAirAdapter::new(&config.air_quality.to_client_config()).unwrap();

    let reading = adapter.current_reading(&new_york()).await.unwrap();
    assert_eq!(reading.source(), AqiSource::PrimaryProvider);
    assert_eq!(reading.description(), "Good");
    let dominant = reading.dominant_pollutant().unwrap();
    assert_eq!(dominant.formatted_value().as_deref(), Some("10.4 μg/m³"));
}

#[tokio::test]
async fn owm_adapter_maps_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/2.5/air_pollution"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let adapter = OpenWeatherMapAdapter::new(&config.air_quality.to_client_config()).unwrap();

    let result = adapter.current_reading(&new_york()).await;
    assert!(matches!(result, Err(ApplicationError::RateLimited)));
}
