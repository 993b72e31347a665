//! Fixed poster layout.
//!
//! Positions are fractions of the canvas size; text is anchored on its
//! centre both horizontally and vertically.

use image::Rgba;
use imageproc::rect::Rect;

use poster_common::{PosterError, PosterLabels, PosterResult, WeatherRecord};

/// Output canvas width (9:16 portrait).
pub const CANVAS_WIDTH: u32 = 540;
/// Output canvas height (9:16 portrait).
pub const CANVAS_HEIGHT: u32 = 960;

/// Full-canvas dimming layer, ~31% black.
pub const DIM_OVERLAY: Rgba<u8> = Rgba([0, 0, 0, 80]);
/// Fill colour for all text.
pub const TEXT_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);
/// Drop shadow colour, drawn before the fill.
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 160]);
/// Drop shadow offset in pixels, applied to both axes.
pub const SHADOW_OFFSET: f32 = 3.0;

/// Info row panel colour.
pub const PANEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 40]);
/// Horizontal inset of info row panels from each canvas edge.
pub const PANEL_MARGIN: i32 = 40;
/// Info row panel height.
pub const PANEL_HEIGHT: u32 = 60;
/// Distance from a row's anchor up to its panel's top edge.
pub const PANEL_PADDING: f32 = 40.0;

/// First info row, as a fraction of canvas height.
pub const INFO_ROW_START: f32 = 0.5;
/// Spacing between info rows, as a fraction of canvas height.
pub const INFO_ROW_SPACING: f32 = 0.08;

/// Which font size a text element uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// City name.
    Title,
    /// Temperature.
    Large,
    /// Weather description.
    Medium,
    /// Info rows.
    Normal,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::Title,
        FontRole::Large,
        FontRole::Medium,
        FontRole::Normal,
    ];

    /// Font size in points (em height in pixels).
    pub fn point_size(self) -> f32 {
        match self {
            FontRole::Title => 80.0,
            FontRole::Large => 60.0,
            FontRole::Medium => 40.0,
            FontRole::Normal => 32.0,
        }
    }
}

/// A piece of text placed on the poster, with the panel drawn behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    /// Anchor x (horizontal centre).
    pub x: f32,
    /// Anchor y (vertical centre).
    pub y: f32,
    pub role: FontRole,
    pub panel: Option<Rect>,
}

/// Layout calculator for a canvas of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PosterLayout {
    width: u32,
    height: u32,
}

impl Default for PosterLayout {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

impl PosterLayout {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn w(&self) -> f32 {
        self.width as f32
    }

    fn h(&self) -> f32 {
        self.height as f32
    }

    pub fn city_anchor(&self) -> (f32, f32) {
        (self.w() / 2.0, self.h() * 0.2)
    }

    pub fn temperature_anchor(&self) -> (f32, f32) {
        (self.w() * 0.3, self.h() * 0.4)
    }

    pub fn description_anchor(&self) -> (f32, f32) {
        (self.w() * 0.7, self.h() * 0.4)
    }

    /// Anchor of the n-th info row (0 = feels-like, 1 = humidity, 2 = wind).
    pub fn info_row_anchor(&self, index: usize) -> (f32, f32) {
        let y = self.h() * INFO_ROW_START + index as f32 * self.h() * INFO_ROW_SPACING;
        (self.w() / 2.0, y)
    }

    /// Panel behind an info row whose anchor is at `row_y`.
    ///
    /// Spans `PANEL_MARGIN..width - PANEL_MARGIN`; the top edge is
    /// truncated to whole pixels.
    pub fn panel_for_row(&self, row_y: f32) -> Rect {
        let top = (row_y - PANEL_PADDING) as i32;
        let panel_width = self.width.saturating_sub(2 * PANEL_MARGIN as u32).max(1);
        Rect::at(PANEL_MARGIN, top).of_size(panel_width, PANEL_HEIGHT)
    }

    /// Every text element of the poster, in drawing order.
    pub fn elements(
        &self,
        record: &WeatherRecord,
        labels: &PosterLabels,
    ) -> PosterResult<Vec<TextElement>> {
        let condition = record.primary_condition().ok_or_else(|| {
            PosterError::InvalidInput("weather list must contain at least one condition".to_string())
        })?;

        let mut elements = Vec::with_capacity(6);

        let (x, y) = self.city_anchor();
        elements.push(TextElement {
            text: record.name.clone(),
            x,
            y,
            role: FontRole::Title,
            panel: None,
        });

        let (x, y) = self.temperature_anchor();
        elements.push(TextElement {
            text: labels.temperature(record.main.temp),
            x,
            y,
            role: FontRole::Large,
            panel: None,
        });

        let (x, y) = self.description_anchor();
        elements.push(TextElement {
            text: condition.description.clone(),
            x,
            y,
            role: FontRole::Medium,
            panel: None,
        });

        let rows = [
            labels.feels_like_row(record.main.feels_like),
            labels.humidity_row(record.main.humidity),
            labels.wind_row(record.wind.speed),
        ];
        for (index, text) in rows.into_iter().enumerate() {
            let (x, y) = self.info_row_anchor(index);
            elements.push(TextElement {
                text,
                x,
                y,
                role: FontRole::Normal,
                panel: Some(self.panel_for_row(y)),
            });
        }

        Ok(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_positions() {
        let layout = PosterLayout::default();
        assert_eq!(layout.city_anchor(), (270.0, 192.0));
        assert_eq!(layout.temperature_anchor(), (162.0, 384.0));
        assert_eq!(layout.description_anchor(), (378.0, 384.0));
        assert_eq!(layout.info_row_anchor(0), (270.0, 480.0));
    }

    #[test]
    fn test_panel_top_is_truncated() {
        let layout = PosterLayout::default();
        let tops: Vec<i32> = (0..3)
            .map(|i| layout.panel_for_row(layout.info_row_anchor(i).1).top())
            .collect();
        assert_eq!(tops, vec![440, 516, 593]);
    }

    #[test]
    fn test_panel_span() {
        let panel = PosterLayout::default().panel_for_row(480.0);
        assert_eq!(panel.left(), 40);
        assert_eq!(panel.right(), 499);
        assert_eq!(panel.height(), 60);
    }
}
