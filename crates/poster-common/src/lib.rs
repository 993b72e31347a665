//! Common types and utilities shared across the weather poster crates.

pub mod error;
pub mod format;
pub mod labels;
pub mod weather;

pub use error::{PosterError, PosterResult};
pub use format::format_decimal;
pub use labels::PosterLabels;
pub use weather::{MainReadings, WeatherCondition, WeatherRecord, WindReadings};
