//! The poster rendering pipeline.

use std::time::{Duration, Instant};

use image::RgbaImage;
use serde::Serialize;

use poster_common::{PosterLabels, PosterResult, WeatherRecord};

use crate::assets::{AssetConfig, AssetSource, AssetStore};
use crate::compose::{apply_overlay, fill_rect};
use crate::layout::{PosterLayout, DIM_OVERLAY, PANEL_COLOR};
use crate::png::encode_png;

/// An encoded poster image (PNG).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPoster {
    data: Vec<u8>,
}

impl RenderedPoster {
    pub const CONTENT_TYPE: &'static str = "image/png";

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// What one render did besides producing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RenderDiagnostics {
    pub background: AssetSource,
    pub font: AssetSource,
    #[serde(skip)]
    pub elapsed: Duration,
}

/// Renders weather records into posters.
///
/// Holds no per-render state; concurrent calls each build their own canvas.
#[derive(Debug)]
pub struct PosterRenderer {
    assets: AssetStore,
    labels: PosterLabels,
    layout: PosterLayout,
}

impl PosterRenderer {
    /// Create a renderer, failing fast on structurally invalid asset paths.
    pub fn new(config: AssetConfig) -> PosterResult<Self> {
        config.validate()?;
        Ok(Self {
            assets: AssetStore::new(config),
            labels: PosterLabels::default(),
            layout: PosterLayout::default(),
        })
    }

    pub fn with_labels(mut self, labels: PosterLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn labels(&self) -> &PosterLabels {
        &self.labels
    }

    pub fn layout(&self) -> &PosterLayout {
        &self.layout
    }

    pub fn asset_config(&self) -> &AssetConfig {
        self.assets.config()
    }

    /// Render a poster and encode it as PNG.
    pub fn render(&self, record: &WeatherRecord) -> PosterResult<RenderedPoster> {
        self.render_with_diagnostics(record).map(|(poster, _)| poster)
    }

    /// Render a poster, also reporting which assets fell back.
    pub fn render_with_diagnostics(
        &self,
        record: &WeatherRecord,
    ) -> PosterResult<(RenderedPoster, RenderDiagnostics)> {
        let started = Instant::now();
        let (canvas, mut diagnostics) = self.compose(record)?;
        let data = encode_png(&canvas)?;
        diagnostics.elapsed = started.elapsed();

        tracing::debug!(
            city = %record.name,
            bytes = data.len(),
            elapsed_ms = diagnostics.elapsed.as_secs_f64() * 1000.0,
            background = ?diagnostics.background,
            font = ?diagnostics.font,
            "Rendered poster"
        );

        Ok((RenderedPoster { data }, diagnostics))
    }

    /// Build the composited canvas without encoding it.
    ///
    /// Order: background (or white), fonts (or bitmap), dim overlay, then
    /// for each element its panel, its shadow and its fill.
    pub fn compose(&self, record: &WeatherRecord) -> PosterResult<(RgbaImage, RenderDiagnostics)> {
        let started = Instant::now();
        record.validate()?;
        let elements = self.layout.elements(record, &self.labels)?;

        let (mut canvas, background) = self
            .assets
            .background(self.layout.width(), self.layout.height());
        let (fonts, font) = self.assets.fonts();

        apply_overlay(&mut canvas, DIM_OVERLAY);

        for element in &elements {
            if let Some(panel) = element.panel {
                fill_rect(&mut canvas, panel, PANEL_COLOR);
            }
            fonts
                .get(element.role)
                .draw_with_shadow(&mut canvas, element.x, element.y, &element.text);
        }

        let diagnostics = RenderDiagnostics {
            background,
            font,
            elapsed: started.elapsed(),
        };
        Ok((canvas, diagnostics))
    }
}
