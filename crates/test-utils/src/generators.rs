//! Background image generators and raster inspection helpers.

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Pure white, the colour of fill text.
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Writes a solid-colour PNG background into `dir` and returns its path.
pub fn write_solid_background(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, Rgba([color[0], color[1], color[2], 255]))
        .save(&path)
        .expect("Failed to write test background");
    path
}

/// Writes a vertical blue-to-orange gradient PNG into `dir`.
///
/// Useful for checking that the background is resampled rather than tiled.
pub fn write_gradient_background(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbaImage::from_fn(width, height, |_, y| {
        let t = y as f32 / (height.max(2) - 1) as f32;
        Rgba([
            (30.0 + t * 210.0) as u8,
            (60.0 + t * 90.0) as u8,
            (200.0 - t * 170.0) as u8,
            255,
        ])
    });
    img.save(&path).expect("Failed to write test background");
    path
}

/// Writes bytes that are not a valid image or font.
pub fn write_garbage_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"this is not an asset").expect("Failed to write garbage file");
    path
}

/// Inclusive pixel bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl PixelBox {
    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) as f32 / 2.0,
            (self.min_y + self.max_y) as f32 / 2.0,
        )
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Bounding box of pixels matching `predicate` within `[x0, x1) x [y0, y1)`.
pub fn bounding_box<F>(img: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, predicate: F) -> Option<PixelBox>
where
    F: Fn(&Rgba<u8>) -> bool,
{
    let mut found: Option<PixelBox> = None;
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            if !predicate(img.get_pixel(x, y)) {
                continue;
            }
            found = Some(match found {
                None => PixelBox {
                    min_x: x,
                    min_y: y,
                    max_x: x,
                    max_y: y,
                },
                Some(b) => PixelBox {
                    min_x: b.min_x.min(x),
                    min_y: b.min_y.min(y),
                    max_x: b.max_x.max(x),
                    max_y: b.max_y.max(y),
                },
            });
        }
    }
    found
}

/// Bounding box of pure white pixels within a region.
pub fn white_bbox(img: &RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32) -> Option<PixelBox> {
    bounding_box(img, x0, y0, x1, y1, |p| *p == WHITE)
}

/// Rec. 601 luma of a pixel, ignoring alpha.
pub fn luminance(pixel: &Rgba<u8>) -> f32 {
    0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_finds_marked_pixels() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        img.put_pixel(2, 3, WHITE);
        img.put_pixel(6, 8, WHITE);
        let bbox = white_bbox(&img, 0, 0, 10, 10).unwrap();
        assert_eq!(bbox, PixelBox { min_x: 2, min_y: 3, max_x: 6, max_y: 8 });
        assert_eq!(bbox.center(), (4.0, 5.5));
        assert_eq!(bbox.width(), 5);
    }

    #[test]
    fn test_bounding_box_respects_region() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 0, 255]));
        img.put_pixel(9, 9, WHITE);
        assert!(white_bbox(&img, 0, 0, 9, 9).is_none());
    }

    #[test]
    fn test_write_solid_background() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_solid_background(dir.path(), "bg.png", 4, 4, [1, 2, 3]);
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(3, 3), &Rgba([1, 2, 3, 255]));
    }
}
