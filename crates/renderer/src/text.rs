//! Anchor-centred text drawing with a drop shadow.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use rusttype::{point, Font, Scale};

use crate::bitmap_font::BitmapFont;
use crate::compose::blend_pixel;
use crate::layout::{FontRole, SHADOW_COLOR, SHADOW_OFFSET, TEXT_COLOR};

/// A font at one size: either a loaded TrueType face or the built-in bitmap font.
#[derive(Clone)]
pub enum PosterFont {
    TrueType { font: Arc<Font<'static>>, scale: Scale },
    Bitmap(BitmapFont),
}

impl std::fmt::Debug for PosterFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PosterFont::TrueType { scale, .. } => f
                .debug_struct("TrueType")
                .field("scale", &scale.y)
                .finish(),
            PosterFont::Bitmap(bitmap) => f.debug_tuple("Bitmap").field(bitmap).finish(),
        }
    }
}

/// Convert a point size (em height in pixels) into a rusttype scale.
///
/// rusttype scales so that ascent - descent spans the requested height;
/// font sizes are conventionally the em size instead.
pub fn em_scale(font: &Font<'_>, point_size: f32) -> Scale {
    let units_per_em = font.units_per_em() as f32;
    let v_metrics = font.v_metrics_unscaled();
    let line_height = v_metrics.ascent - v_metrics.descent;
    if units_per_em <= 0.0 || line_height <= 0.0 {
        return Scale::uniform(point_size);
    }
    Scale::uniform(point_size * line_height / units_per_em)
}

impl PosterFont {
    pub fn truetype(font: Arc<Font<'static>>, point_size: f32) -> Self {
        let scale = em_scale(&font, point_size);
        PosterFont::TrueType { font, scale }
    }

    pub fn bitmap(point_size: f32) -> Self {
        PosterFont::Bitmap(BitmapFont::for_point_size(point_size))
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, PosterFont::Bitmap(_))
    }

    /// Advance width of `text` in pixels.
    pub fn text_width(&self, text: &str) -> f32 {
        match self {
            PosterFont::TrueType { font, scale } => font
                .layout(text, *scale, point(0.0, 0.0))
                .last()
                .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
                .unwrap_or(0.0),
            PosterFont::Bitmap(bitmap) => bitmap.text_size(text).0 as f32,
        }
    }

    /// Draw `text` centred on (`cx`, `cy`).
    ///
    /// Horizontally the advance width is centred; vertically the midpoint
    /// between ascender and descender lands on `cy`.
    pub fn draw_centered(&self, img: &mut RgbaImage, cx: f32, cy: f32, text: &str, color: Rgba<u8>) {
        match self {
            PosterFont::TrueType { font, scale } => {
                let v_metrics = font.v_metrics(*scale);
                let origin_x = cx - self.text_width(text) / 2.0;
                let baseline = cy + (v_metrics.ascent + v_metrics.descent) / 2.0;

                for glyph in font.layout(text, *scale, point(origin_x, baseline)) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, coverage| {
                        blend_pixel(img, bb.min.x + gx as i32, bb.min.y + gy as i32, color, coverage);
                    });
                }
            }
            PosterFont::Bitmap(bitmap) => bitmap.draw_centered(img, cx, cy, text, color),
        }
    }

    /// Draw the shadow at +`SHADOW_OFFSET`, then the white fill on top.
    pub fn draw_with_shadow(&self, img: &mut RgbaImage, cx: f32, cy: f32, text: &str) {
        self.draw_centered(img, cx + SHADOW_OFFSET, cy + SHADOW_OFFSET, text, SHADOW_COLOR);
        self.draw_centered(img, cx, cy, text, TEXT_COLOR);
    }
}

/// One font per layout role.
#[derive(Debug, Clone)]
pub struct FontSet {
    pub title: PosterFont,
    pub large: PosterFont,
    pub medium: PosterFont,
    pub normal: PosterFont,
}

impl FontSet {
    /// All four roles from a single TrueType face.
    pub fn from_truetype(font: Arc<Font<'static>>) -> Self {
        Self {
            title: PosterFont::truetype(Arc::clone(&font), FontRole::Title.point_size()),
            large: PosterFont::truetype(Arc::clone(&font), FontRole::Large.point_size()),
            medium: PosterFont::truetype(Arc::clone(&font), FontRole::Medium.point_size()),
            normal: PosterFont::truetype(font, FontRole::Normal.point_size()),
        }
    }

    /// All four roles from the built-in bitmap font.
    pub fn builtin() -> Self {
        Self {
            title: PosterFont::bitmap(FontRole::Title.point_size()),
            large: PosterFont::bitmap(FontRole::Large.point_size()),
            medium: PosterFont::bitmap(FontRole::Medium.point_size()),
            normal: PosterFont::bitmap(FontRole::Normal.point_size()),
        }
    }

    pub fn get(&self, role: FontRole) -> &PosterFont {
        match role {
            FontRole::Title => &self.title,
            FontRole::Large => &self.large,
            FontRole::Medium => &self.medium,
            FontRole::Normal => &self.normal,
        }
    }
}
