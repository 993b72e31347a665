//! Source-over compositing onto the poster canvas.

use image::{Pixel, Rgba, RgbaImage};
use imageproc::rect::Rect;
use rayon::prelude::*;

/// Minimum pixel count before the full-canvas overlay is split across threads.
const PARALLEL_THRESHOLD: usize = 64 * 64;

/// Composite `color` over one pixel, with its alpha scaled by `coverage`.
///
/// Out-of-bounds coordinates are ignored so glyphs and shadows may run off
/// the canvas edge.
#[inline]
pub fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= img.width() || y as u32 >= img.height() {
        return;
    }
    let alpha = (color[3] as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
    if alpha == 0 {
        return;
    }
    let src = Rgba([color[0], color[1], color[2], alpha]);
    img.get_pixel_mut(x as u32, y as u32).blend(&src);
}

/// Composite a translucent colour over the whole canvas.
pub fn apply_overlay(img: &mut RgbaImage, color: Rgba<u8>) {
    if color[3] == 0 {
        return;
    }
    let num_pixels = (img.width() * img.height()) as usize;
    let row_len = img.width() as usize * 4;

    if num_pixels >= PARALLEL_THRESHOLD && row_len > 0 {
        img.par_chunks_mut(row_len).for_each(|row| {
            for px in row.chunks_exact_mut(4) {
                Rgba::from_slice_mut(px).blend(&color);
            }
        });
    } else {
        for px in img.pixels_mut() {
            px.blend(&color);
        }
    }
}

/// Composite a translucent colour over a rectangle, clipped to the canvas.
pub fn fill_rect(img: &mut RgbaImage, rect: Rect, color: Rgba<u8>) {
    if img.width() == 0 || img.height() == 0 {
        return;
    }
    let bounds = Rect::at(0, 0).of_size(img.width(), img.height());
    let Some(clipped) = rect.intersect(bounds) else {
        return;
    };

    for y in clipped.top()..=clipped.bottom() {
        for x in clipped.left()..=clipped.right() {
            img.get_pixel_mut(x as u32, y as u32).blend(&color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_darkens_white() {
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        apply_overlay(&mut img, Rgba([0, 0, 0, 80]));
        let px = img.get_pixel(0, 0);
        assert!((173..=176).contains(&px[0]), "got {:?}", px);
        assert_eq!(px[0], px[1]);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn test_parallel_and_sequential_overlay_agree() {
        let mut large = RgbaImage::from_pixel(128, 128, Rgba([10, 200, 90, 255]));
        let mut small = RgbaImage::from_pixel(2, 2, Rgba([10, 200, 90, 255]));
        apply_overlay(&mut large, Rgba([0, 0, 0, 80]));
        apply_overlay(&mut small, Rgba([0, 0, 0, 80]));
        assert_eq!(large.get_pixel(127, 127), small.get_pixel(1, 1));
    }

    #[test]
    fn test_fill_rect_is_clipped() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        fill_rect(&mut img, Rect::at(-5, 8).of_size(20, 20), Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(0, 9), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(9, 8), &Rgba([0, 0, 0, 255]));
        assert_eq!(img.get_pixel(0, 7), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_blend_pixel_ignores_out_of_bounds() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        blend_pixel(&mut img, -1, 0, Rgba([0, 0, 0, 255]), 1.0);
        blend_pixel(&mut img, 2, 2, Rgba([0, 0, 0, 255]), 1.0);
        assert!(img.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_blend_pixel_scales_alpha_by_coverage() {
        let mut img = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        blend_pixel(&mut img, 0, 0, Rgba([0, 0, 0, 255]), 0.0);
        assert_eq!(img.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        blend_pixel(&mut img, 0, 0, Rgba([0, 0, 0, 255]), 0.5);
        let px = img.get_pixel(0, 0);
        assert!((120..=135).contains(&px[0]), "got {:?}", px);
    }
}
