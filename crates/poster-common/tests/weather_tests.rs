//! Tests for weather record parsing and validation.

use poster_common::{PosterError, PosterLabels, WeatherRecord};
use std::io::Write;

const BEIJING_JSON: &str = r#"{
    "name": "Beijing",
    "weather": [{"main": "Clouds", "description": "多云", "icon": "04d"}],
    "main": {"temp": 23.5, "feels_like": 25.0, "humidity": 60},
    "wind": {"speed": 3.2}
}"#;

fn beijing() -> WeatherRecord {
    serde_json::from_str(BEIJING_JSON).unwrap()
}

// ============================================================================
// Deserialization tests
// ============================================================================

#[test]
fn test_parse_feed_payload() {
    let record = beijing();
    assert_eq!(record.name, "Beijing");
    assert_eq!(record.weather_list.len(), 1);
    assert_eq!(record.weather_list[0].description, "多云");
    assert_eq!(record.weather_list[0].icon, "04d");
    assert_eq!(record.main.temp, 23.5);
    assert_eq!(record.main.feels_like, 25.0);
    assert_eq!(record.main.humidity, 60);
    assert_eq!(record.wind.speed, 3.2);
}

#[test]
fn test_parse_camel_case_aliases() {
    let json = r#"{
        "name": "Oslo",
        "weatherList": [{"main": "Snow", "description": "light snow", "icon": "13d"}],
        "main": {"temp": -3.0, "feelsLike": -8.5, "humidity": 91},
        "wind": {"speed": 6.0}
    }"#;
    let record: WeatherRecord = serde_json::from_str(json).unwrap();
    assert_eq!(record.weather_list[0].main, "Snow");
    assert_eq!(record.main.feels_like, -8.5);
}

#[test]
fn test_parse_rejects_missing_field() {
    let json = r#"{"name": "Nowhere", "weather": [], "main": {"temp": 1.0, "humidity": 2}, "wind": {"speed": 0.0}}"#;
    assert!(serde_json::from_str::<WeatherRecord>(json).is_err());
}

#[test]
fn test_serialize_uses_feed_names() {
    let value = serde_json::to_value(beijing()).unwrap();
    assert!(value.get("weather").is_some());
    assert!(value.get("weather_list").is_none());
    assert!(value["main"].get("feels_like").is_some());
}

// ============================================================================
// Validation tests
// ============================================================================

#[test]
fn test_validate_accepts_valid_record() {
    assert!(beijing().validate().is_ok());
}

#[test]
fn test_validate_rejects_empty_weather_list() {
    let mut record = beijing();
    record.weather_list.clear();
    let err = record.validate().unwrap_err();
    assert!(matches!(err, PosterError::InvalidInput(_)));
    assert_eq!(err.http_status_code(), 400);
}

#[test]
fn test_validate_rejects_non_finite_readings() {
    let mut record = beijing();
    record.main.temp = f64::NAN;
    assert!(matches!(record.validate(), Err(PosterError::InvalidInput(_))));

    let mut record = beijing();
    record.main.feels_like = f64::NEG_INFINITY;
    assert!(matches!(record.validate(), Err(PosterError::InvalidInput(_))));

    let mut record = beijing();
    record.wind.speed = f64::INFINITY;
    let err = record.validate().unwrap_err();
    assert!(err.to_string().contains("wind.speed"));
}

#[test]
fn test_primary_condition_is_first() {
    let mut record = beijing();
    record.weather_list.push(poster_common::WeatherCondition {
        main: "Rain".to_string(),
        description: "小雨".to_string(),
        icon: "10d".to_string(),
    });
    assert_eq!(record.primary_condition().unwrap().description, "多云");
}

// ============================================================================
// Label table tests
// ============================================================================

#[test]
fn test_labels_load_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "humidity: Humidity").unwrap();
    writeln!(file, "wind_unit: km/h").unwrap();

    let labels = PosterLabels::load_from_file(file.path()).unwrap();
    assert_eq!(labels.humidity_row(45), "Humidity: 45%");
    assert_eq!(labels.wind_row(12.5), "风速: 12.5 km/h");
}

#[test]
fn test_labels_invalid_yaml_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "humidity: [unclosed").unwrap();

    let err = PosterLabels::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, PosterError::InvalidConfig(_)));
}
