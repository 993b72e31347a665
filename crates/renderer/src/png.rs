//! PNG encoding for the composited poster.
//!
//! Picks the smallest lossless layout for the pixels it is given:
//! - **Indexed (color type 3)** when there are at most 256 distinct colours,
//!   with a `tRNS` chunk if any of them is translucent.
//! - **RGB (color type 2)** for fully opaque images.
//! - **RGBA (color type 6)** otherwise.
//!
//! Output is deterministic: the palette is built in first-occurrence order
//! and every scanline's filter is chosen by a fixed heuristic.

use image::RgbaImage;
use rayon::prelude::*;
use std::collections::HashMap;
use std::io::Write;

use poster_common::{PosterError, PosterResult};

/// PNG file signature.
const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

const COLOR_TYPE_RGB: u8 = 2;
const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

/// Encode an RGBA image.
pub fn encode_png(img: &RgbaImage) -> PosterResult<Vec<u8>> {
    create_png_auto(img.as_raw(), img.width() as usize, img.height() as usize)
}

/// Encode raw RGBA pixels (4 bytes per pixel) with automatic layout selection.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> PosterResult<Vec<u8>> {
    check_dimensions(pixels, width, height)?;

    if let Some((palette, indices)) = extract_palette(pixels) {
        return create_png_indexed(width, height, &palette, &indices);
    }

    let opaque = pixels.chunks_exact(4).all(|px| px[3] == u8::MAX);
    if opaque {
        let rgb: Vec<u8> = pixels
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        encode(width, height, COLOR_TYPE_RGB, &rgb, 3, true, &[])
    } else {
        encode(width, height, COLOR_TYPE_RGBA, pixels, 4, true, &[])
    }
}

/// Encode an indexed image from a palette and one index per pixel.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[[u8; 4]],
    indices: &[u8],
) -> PosterResult<Vec<u8>> {
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(PosterError::RenderError(format!(
            "palette must hold 1..=256 colors, got {}",
            palette.len()
        )));
    }
    if indices.len() != width * height {
        return Err(PosterError::RenderError(format!(
            "expected {} palette indices, got {}",
            width * height,
            indices.len()
        )));
    }

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c[0], c[1], c[2]]).collect();
    let mut ancillary = vec![(*b"PLTE", plte)];

    // tRNS only needs entries up to the last translucent color
    if let Some(last) = palette.iter().rposition(|c| c[3] < u8::MAX) {
        let trns: Vec<u8> = palette[..=last].iter().map(|c| c[3]).collect();
        ancillary.push((*b"tRNS", trns));
    }

    encode(width, height, COLOR_TYPE_INDEXED, indices, 1, false, &ancillary)
}

fn check_dimensions(pixels: &[u8], width: usize, height: usize) -> PosterResult<()> {
    if width == 0 || height == 0 {
        return Err(PosterError::RenderError(format!(
            "cannot encode an empty {}x{} image",
            width, height
        )));
    }
    if pixels.len() != width * height * 4 {
        return Err(PosterError::RenderError(format!(
            "expected {} bytes of RGBA data for {}x{}, got {}",
            width * height * 4,
            width,
            height,
            pixels.len()
        )));
    }
    Ok(())
}

/// Build a palette in first-occurrence order, or `None` past 256 colors.
fn extract_palette(pixels: &[u8]) -> Option<(Vec<[u8; 4]>, Vec<u8>)> {
    let mut color_to_index: HashMap<[u8; 4], u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<[u8; 4]> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let color = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let index = match color_to_index.get(&color) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(color);
                color_to_index.insert(color, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Assemble the chunks of a PNG file.
fn encode(
    width: usize,
    height: usize,
    color_type: u8,
    data: &[u8],
    bytes_per_pixel: usize,
    adaptive_filter: bool,
    ancillary: &[([u8; 4], Vec<u8>)],
) -> PosterResult<Vec<u8>> {
    let mut png = Vec::with_capacity(data.len() / 2);
    png.extend_from_slice(&SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    for (chunk_type, chunk_data) in ancillary {
        write_chunk(&mut png, chunk_type, chunk_data);
    }

    let filtered = filter_scanlines(data, width * bytes_per_pixel, height, bytes_per_pixel, adaptive_filter);
    let idat = deflate(&filtered)
        .map_err(|e| PosterError::RenderError(format!("IDAT compression failed: {}", e)))?;
    write_chunk(&mut png, b"IDAT", &idat);

    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Prefix each scanline with its filter byte and apply the filter.
///
/// Filtering only reads the raw previous row, so rows are processed in
/// parallel and concatenated in order.
fn filter_scanlines(data: &[u8], stride: usize, height: usize, bpp: usize, adaptive: bool) -> Vec<u8> {
    let rows: Vec<Vec<u8>> = (0..height)
        .into_par_iter()
        .map(|y| {
            let raw = &data[y * stride..(y + 1) * stride];
            if !adaptive {
                let mut out = Vec::with_capacity(stride + 1);
                out.push(0);
                out.extend_from_slice(raw);
                return out;
            }
            let prev = (y > 0).then(|| &data[(y - 1) * stride..y * stride]);
            filter_row_adaptive(raw, prev, bpp)
        })
        .collect();

    rows.concat()
}

/// Try all five filters and keep the one with the smallest sum of
/// absolute (signed) residuals.
fn filter_row_adaptive(raw: &[u8], prev: Option<&[u8]>, bpp: usize) -> Vec<u8> {
    let mut best: Option<(u64, Vec<u8>)> = None;

    for filter in 0u8..5 {
        let mut out = Vec::with_capacity(raw.len() + 1);
        out.push(filter);
        for i in 0..raw.len() {
            let a = if i >= bpp { raw[i - bpp] } else { 0 };
            let b = prev.map_or(0, |p| p[i]);
            let c = if i >= bpp { prev.map_or(0, |p| p[i - bpp]) } else { 0 };
            let predicted = match filter {
                0 => 0,
                1 => a,
                2 => b,
                3 => ((a as u16 + b as u16) / 2) as u8,
                _ => paeth(a, b, c),
            };
            out.push(raw[i].wrapping_sub(predicted));
        }

        let cost: u64 = out[1..].iter().map(|&v| (v as i8).unsigned_abs() as u64).sum();
        if best.as_ref().map_or(true, |(best_cost, _)| cost < *best_cost) {
            best = Some((cost, out));
        }
    }

    best.map(|(_, row)| row).unwrap_or_default()
}

#[inline(always)]
fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Write a PNG chunk
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_palette_first_occurrence_order() {
        let pixels = [
            0, 0, 255, 255, // blue
            255, 0, 0, 255, // red
            0, 0, 255, 255, // blue again
        ];
        let (palette, indices) = extract_palette(&pixels).unwrap();
        assert_eq!(palette, vec![[0, 0, 255, 255], [255, 0, 0, 255]]);
        assert_eq!(indices, vec![0, 1, 0]);
    }

    #[test]
    fn test_extract_palette_too_many_colors() {
        let pixels: Vec<u8> = (0..300u32)
            .flat_map(|i| [(i % 256) as u8, (i / 256) as u8, 0, 255])
            .collect();
        assert!(extract_palette(&pixels).is_none());
    }

    #[test]
    fn test_paeth_predictor() {
        assert_eq!(paeth(10, 20, 10), 20);
        assert_eq!(paeth(20, 10, 10), 20);
        assert_eq!(paeth(0, 0, 0), 0);
    }

    #[test]
    fn test_filter_row_prefers_sub_for_gradients() {
        let raw: Vec<u8> = (0..16u8).map(|i| i * 8).collect();
        let row = filter_row_adaptive(&raw, None, 1);
        assert_eq!(row[0], 1);
        assert!(row[2..].iter().all(|&v| v == 8));
    }

    #[test]
    fn test_write_chunk_layout() {
        let mut png = Vec::new();
        write_chunk(&mut png, b"IEND", &[]);
        assert_eq!(&png[0..4], &[0, 0, 0, 0]);
        assert_eq!(&png[4..8], b"IEND");
        // Well-known CRC of an empty IEND chunk
        assert_eq!(&png[8..12], &[0xAE, 0x42, 0x60, 0x82]);
    }
}
