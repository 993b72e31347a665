//! Weather data accepted by the poster renderer.
//!
//! Field names on the wire follow the upstream weather feed: the condition
//! list is `weather` and the apparent temperature is `feels_like`. The
//! camel-case spellings `weatherList` and `feelsLike` are accepted as aliases.

use serde::{Deserialize, Serialize};

use crate::error::{PosterError, PosterResult};

/// One weather condition entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCondition {
    /// Condition category (e.g. "Clouds").
    pub main: String,
    /// Human-readable description drawn on the poster.
    pub description: String,
    /// Icon code (e.g. "04d"). Not drawn.
    pub icon: String,
}

/// Temperature and humidity readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    /// Temperature in °C.
    pub temp: f64,
    /// Apparent temperature in °C.
    #[serde(alias = "feelsLike")]
    pub feels_like: f64,
    /// Relative humidity in percent.
    pub humidity: i64,
}

/// Wind readings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindReadings {
    /// Wind speed in m/s.
    pub speed: f64,
}

/// A complete weather record for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Location label.
    pub name: String,
    /// Ordered conditions; only the first one is drawn.
    #[serde(rename = "weather", alias = "weatherList")]
    pub weather_list: Vec<WeatherCondition>,
    pub main: MainReadings,
    pub wind: WindReadings,
}

impl WeatherRecord {
    /// Check the preconditions rendering relies on.
    ///
    /// The condition list must be non-empty and every float reading must be
    /// finite.
    pub fn validate(&self) -> PosterResult<()> {
        if self.weather_list.is_empty() {
            return Err(PosterError::InvalidInput(
                "weather list must contain at least one condition".to_string(),
            ));
        }

        let readings = [
            ("main.temp", self.main.temp),
            ("main.feels_like", self.main.feels_like),
            ("wind.speed", self.wind.speed),
        ];
        for (field, value) in readings {
            if !value.is_finite() {
                return Err(PosterError::InvalidInput(format!(
                    "{} must be a finite number, got {}",
                    field, value
                )));
            }
        }

        Ok(())
    }

    /// The condition whose description is drawn, if any.
    pub fn primary_condition(&self) -> Option<&WeatherCondition> {
        self.weather_list.first()
    }
}
