//! Weather poster rendering.
//!
//! Turns a [`WeatherRecord`](poster_common::WeatherRecord) into a 540x960
//! PNG: a background (or white canvas), a dimming overlay, translucent
//! panels behind the info rows, and shadowed white text.

pub mod assets;
pub mod bitmap_font;
pub mod compose;
pub mod layout;
pub mod png;
pub mod poster;
pub mod text;

pub use assets::{AssetConfig, AssetError, AssetSource, AssetStore};
pub use layout::{FontRole, PosterLayout, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use poster::{PosterRenderer, RenderDiagnostics, RenderedPoster};
pub use text::{FontSet, PosterFont};
