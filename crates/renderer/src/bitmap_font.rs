//! Built-in bitmap font used when no TrueType font can be loaded.
//!
//! 5x7 glyphs for printable ASCII plus the degree sign. Anything else is
//! drawn as a hollow box so missing characters stay visible.

use image::{Rgba, RgbaImage};
use imageproc::rect::Rect;

use crate::compose::fill_rect;

/// Glyph width in font units.
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font units.
pub const GLYPH_HEIGHT: u32 = 7;
/// Advance per character, glyph plus one unit of spacing.
pub const CELL_WIDTH: u32 = GLYPH_WIDTH + 1;

/// Point size that maps to one pixel per font unit.
const UNIT_POINT_SIZE: f32 = 16.0;

/// Column-major glyphs for U+0020..=U+007E; bit 0 is the top row.
const ASCII_GLYPHS: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];

const DEGREE_GLYPH: [u8; 5] = [0x00, 0x06, 0x09, 0x09, 0x06];
const MISSING_GLYPH: [u8; 5] = [0x7F, 0x41, 0x41, 0x41, 0x7F];

/// Bitmap font magnified by an integer factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    magnification: u32,
}

impl BitmapFont {
    pub fn new(magnification: u32) -> Self {
        Self {
            magnification: magnification.max(1),
        }
    }

    /// Pick the magnification for a nominal point size (one unit per 16pt).
    pub fn for_point_size(point_size: f32) -> Self {
        Self::new((point_size / UNIT_POINT_SIZE) as u32)
    }

    pub fn magnification(&self) -> u32 {
        self.magnification
    }

    /// Column data for a character.
    pub fn glyph(ch: char) -> &'static [u8; 5] {
        match ch {
            ' '..='~' => &ASCII_GLYPHS[ch as usize - ' ' as usize],
            '°' => &DEGREE_GLYPH,
            _ => &MISSING_GLYPH,
        }
    }

    /// Pixel size of a string, without trailing spacing.
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        let chars = text.chars().count() as u32;
        let height = GLYPH_HEIGHT * self.magnification;
        if chars == 0 {
            return (0, height);
        }
        ((chars * CELL_WIDTH - 1) * self.magnification, height)
    }

    /// Draw a string with its top-left corner at (`left`, `top`).
    pub fn draw(&self, img: &mut RgbaImage, left: i32, top: i32, text: &str, color: Rgba<u8>) {
        let mag = self.magnification as i32;
        let advance = CELL_WIDTH as i32 * mag;

        for (index, ch) in text.chars().enumerate() {
            let cell_left = left + index as i32 * advance;
            for (col, bits) in Self::glyph(ch).iter().enumerate() {
                for row in 0..GLYPH_HEIGHT as i32 {
                    if bits & (1 << row) == 0 {
                        continue;
                    }
                    let x = cell_left + col as i32 * mag;
                    let y = top + row * mag;
                    fill_rect(img, Rect::at(x, y).of_size(self.magnification, self.magnification), color);
                }
            }
        }
    }

    /// Draw a string centred on (`cx`, `cy`).
    pub fn draw_centered(&self, img: &mut RgbaImage, cx: f32, cy: f32, text: &str, color: Rgba<u8>) {
        let (width, height) = self.text_size(text);
        let left = (cx - width as f32 / 2.0).round() as i32;
        let top = (cy - height as f32 / 2.0).round() as i32;
        self.draw(img, left, top, text, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magnification_per_point_size() {
        assert_eq!(BitmapFont::for_point_size(80.0).magnification(), 5);
        assert_eq!(BitmapFont::for_point_size(60.0).magnification(), 3);
        assert_eq!(BitmapFont::for_point_size(40.0).magnification(), 2);
        assert_eq!(BitmapFont::for_point_size(32.0).magnification(), 2);
        assert_eq!(BitmapFont::for_point_size(4.0).magnification(), 1);
    }

    #[test]
    fn test_text_size() {
        let font = BitmapFont::new(2);
        assert_eq!(font.text_size(""), (0, 14));
        assert_eq!(font.text_size("A"), (10, 14));
        assert_eq!(font.text_size("AB"), (22, 14));
        // Counted in chars, not bytes
        assert_eq!(font.text_size("°C"), (22, 14));
    }

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(BitmapFont::glyph(' '), &[0, 0, 0, 0, 0]);
        assert_eq!(BitmapFont::glyph('~'), &ASCII_GLYPHS[94]);
        assert_eq!(BitmapFont::glyph('°'), &DEGREE_GLYPH);
        assert_eq!(BitmapFont::glyph('云'), &MISSING_GLYPH);
    }

    #[test]
    fn test_draw_marks_pixels() {
        let mut img = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let font = BitmapFont::new(1);
        font.draw(&mut img, 0, 0, "I", Rgba([255, 255, 255, 255]));
        // Column 2 of 'I' is fully lit
        for row in 0..7 {
            assert_eq!(img.get_pixel(2, row), &Rgba([255, 255, 255, 255]));
        }
        assert_eq!(img.get_pixel(0, 3), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_draw_centered_bounds() {
        let mut img = RgbaImage::from_pixel(100, 100, Rgba([0, 0, 0, 255]));
        let font = BitmapFont::new(3);
        font.draw_centered(&mut img, 50.0, 50.0, "H", Rgba([255, 255, 255, 255]));
        // 'H' is 15x21 at magnification 3, so its left column starts at 42/43
        let lit: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| p[0] == 255)
            .map(|(x, y, _)| (x, y))
            .collect();
        let min_x = lit.iter().map(|p| p.0).min().unwrap();
        let max_x = lit.iter().map(|p| p.0).max().unwrap();
        let min_y = lit.iter().map(|p| p.1).min().unwrap();
        let max_y = lit.iter().map(|p| p.1).max().unwrap();
        assert_eq!(max_x - min_x + 1, 15);
        assert_eq!(max_y - min_y + 1, 21);
        assert!(((min_x + max_x) as f32 / 2.0 - 50.0).abs() <= 1.0);
        assert!(((min_y + max_y) as f32 / 2.0 - 50.0).abs() <= 1.0);
    }
}
