//! Common weather record fixtures.

use poster_common::{MainReadings, WeatherCondition, WeatherRecord, WindReadings};

/// Raw JSON body for the Beijing scenario, as the upstream feed sends it.
pub const BEIJING_JSON: &str = r#"{
    "name": "Beijing",
    "weather": [{"main": "Clouds", "description": "多云", "icon": "04d"}],
    "main": {"temp": 23.5, "feels_like": 25.0, "humidity": 60},
    "wind": {"speed": 3.2}
}"#;

/// Build a record with a single condition.
pub fn weather_record(
    name: &str,
    description: &str,
    temp: f64,
    feels_like: f64,
    humidity: i64,
    speed: f64,
) -> WeatherRecord {
    WeatherRecord {
        name: name.to_string(),
        weather_list: vec![WeatherCondition {
            main: "Clouds".to_string(),
            description: description.to_string(),
            icon: "04d".to_string(),
        }],
        main: MainReadings {
            temp,
            feels_like,
            humidity,
        },
        wind: WindReadings { speed },
    }
}

/// Beijing, cloudy, 23.5°C.
pub fn beijing() -> WeatherRecord {
    weather_record("Beijing", "多云", 23.5, 25.0, 60, 3.2)
}

/// An ASCII-only record, fully drawable by the built-in bitmap font.
pub fn ascii_record() -> WeatherRecord {
    weather_record("Reykjavik", "Snow", -4.0, -9.5, 87, 11.0)
}

/// A record with an empty condition list (precondition violation).
pub fn empty_conditions() -> WeatherRecord {
    let mut record = beijing();
    record.weather_list.clear();
    record
}
