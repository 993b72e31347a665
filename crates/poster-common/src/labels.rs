//! Label table for the information rows on the poster.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PosterError, PosterResult};
use crate::format::format_decimal;

/// Localized labels and unit suffixes.
///
/// The defaults are the Simplified Chinese labels the poster has always
/// carried. A YAML file can override any subset of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosterLabels {
    pub feels_like: String,
    pub humidity: String,
    pub wind_speed: String,
    pub temperature_unit: String,
    pub humidity_unit: String,
    pub wind_unit: String,
}

impl Default for PosterLabels {
    fn default() -> Self {
        Self {
            feels_like: "体感温度".to_string(),
            humidity: "湿度".to_string(),
            wind_speed: "风速".to_string(),
            temperature_unit: "°C".to_string(),
            humidity_unit: "%".to_string(),
            wind_unit: "m/s".to_string(),
        }
    }
}

impl PosterLabels {
    /// Load a label table from a YAML file. Keys that are absent keep
    /// their default value.
    pub fn load_from_file(path: impl AsRef<Path>) -> PosterResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            PosterError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let labels: PosterLabels = serde_yaml::from_str(&content)?;

        tracing::info!(path = %path.display(), "Loaded poster labels");
        Ok(labels)
    }

    /// `"23.5°C"`
    pub fn temperature(&self, temp: f64) -> String {
        format!("{}{}", format_decimal(temp), self.temperature_unit)
    }

    /// `"体感温度: 25.0°C"`
    pub fn feels_like_row(&self, feels_like: f64) -> String {
        format!("{}: {}", self.feels_like, self.temperature(feels_like))
    }

    /// `"湿度: 60%"`
    pub fn humidity_row(&self, humidity: i64) -> String {
        format!("{}: {}{}", self.humidity, humidity, self.humidity_unit)
    }

    /// `"风速: 3.2 m/s"`
    pub fn wind_row(&self, speed: f64) -> String {
        format!("{}: {} {}", self.wind_speed, format_decimal(speed), self.wind_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rows() {
        let labels = PosterLabels::default();
        assert_eq!(labels.temperature(23.5), "23.5°C");
        assert_eq!(labels.feels_like_row(25.0), "体感温度: 25.0°C");
        assert_eq!(labels.humidity_row(60), "湿度: 60%");
        assert_eq!(labels.wind_row(3.2), "风速: 3.2 m/s");
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let labels: PosterLabels =
            serde_yaml::from_str("feels_like: Feels like\nwind_speed: Wind\n").unwrap();
        assert_eq!(labels.feels_like_row(-1.5), "Feels like: -1.5°C");
        assert_eq!(labels.wind_row(10.0), "Wind: 10.0 m/s");
        assert_eq!(labels.humidity, "湿度");
    }

    #[test]
    fn test_load_from_missing_file_is_config_error() {
        let err = PosterLabels::load_from_file("/nonexistent/labels.yaml").unwrap_err();
        assert!(matches!(err, PosterError::InvalidConfig(_)));
    }
}
