//! Background and font assets, with fallbacks and an optional read-through cache.
//!
//! Asset failures never reach the caller: a missing or undecodable
//! background becomes a white canvas, a missing or invalid font becomes the
//! built-in bitmap font. Each substitution is logged as its own warning.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use lru::LruCache;
use rusttype::Font;
use serde::Serialize;
use thiserror::Error;

use poster_common::{PosterError, PosterResult};

use crate::text::FontSet;

/// Canvas colour used when no background can be loaded.
pub const FALLBACK_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Where the renderer finds its assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    /// Background raster, resampled to fill the canvas.
    pub background_path: PathBuf,
    /// Bold CJK-capable TrueType font.
    pub font_path: PathBuf,
    /// Entries kept per asset kind; 0 disables caching.
    pub cache_capacity: usize,
}

impl AssetConfig {
    pub fn new(background_path: impl Into<PathBuf>, font_path: impl Into<PathBuf>) -> Self {
        Self {
            background_path: background_path.into(),
            font_path: font_path.into(),
            cache_capacity: 0,
        }
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Reject structurally invalid configuration.
    ///
    /// A path that simply does not exist is accepted, since it falls back at
    /// render time; an empty path or one naming a directory is not.
    pub fn validate(&self) -> PosterResult<()> {
        check_asset_path("background", &self.background_path)?;
        check_asset_path("font", &self.font_path)
    }

    /// Warn about assets that will fall back on every render.
    pub fn warn_missing(&self) {
        for (kind, path) in [("background", &self.background_path), ("font", &self.font_path)] {
            if !path.is_file() {
                tracing::warn!(
                    asset = kind,
                    path = %path.display(),
                    "Asset file not found, renders will use the built-in fallback"
                );
            }
        }
    }
}

fn check_asset_path(kind: &str, path: &Path) -> PosterResult<()> {
    if path.as_os_str().is_empty() {
        return Err(PosterError::InvalidConfig(format!("{} path is empty", kind)));
    }
    if path.is_dir() {
        return Err(PosterError::InvalidConfig(format!(
            "{} path {} is a directory",
            kind,
            path.display()
        )));
    }
    Ok(())
}

/// How an asset was obtained for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetSource {
    /// Read and decoded from disk.
    Loaded,
    /// Served from the asset cache.
    Cached,
    /// Unavailable; the built-in default was substituted.
    Fallback,
}

impl AssetSource {
    pub fn is_fallback(self) -> bool {
        self == AssetSource::Fallback
    }
}

type BackgroundKey = (PathBuf, u32, u32);

/// Loads assets per render, optionally through an LRU cache keyed by path.
///
/// Only successful loads are cached, so an asset provisioned after a
/// failed attempt is picked up on the next render.
pub struct AssetStore {
    config: AssetConfig,
    backgrounds: Option<Mutex<LruCache<BackgroundKey, Arc<RgbaImage>>>>,
    fonts: Option<Mutex<LruCache<PathBuf, Arc<Font<'static>>>>>,
}

impl std::fmt::Debug for AssetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStore")
            .field("config", &self.config)
            .field("cached", &self.backgrounds.is_some())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl AssetStore {
    pub fn new(config: AssetConfig) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity);
        Self {
            backgrounds: capacity.map(|c| Mutex::new(LruCache::new(c))),
            fonts: capacity.map(|c| Mutex::new(LruCache::new(c))),
            config,
        }
    }

    pub fn config(&self) -> &AssetConfig {
        &self.config
    }

    /// The background resampled to `width` x `height`, or a white canvas.
    pub fn background(&self, width: u32, height: u32) -> (RgbaImage, AssetSource) {
        let path = &self.config.background_path;
        let key = (path.clone(), width, height);

        if let Some(cache) = &self.backgrounds {
            if let Some(hit) = lock(cache).get(&key) {
                return (hit.as_ref().clone(), AssetSource::Cached);
            }
        }

        match load_background(path, width, height) {
            Ok(canvas) => {
                if let Some(cache) = &self.backgrounds {
                    lock(cache).put(key, Arc::new(canvas.clone()));
                }
                (canvas, AssetSource::Loaded)
            }
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %reason,
                    "Background image unavailable, using white canvas"
                );
                (
                    RgbaImage::from_pixel(width, height, FALLBACK_BACKGROUND),
                    AssetSource::Fallback,
                )
            }
        }
    }

    /// Fonts for every layout role, or the built-in bitmap font.
    pub fn fonts(&self) -> (FontSet, AssetSource) {
        let path = &self.config.font_path;

        if let Some(cache) = &self.fonts {
            if let Some(hit) = lock(cache).get(path) {
                return (FontSet::from_truetype(Arc::clone(hit)), AssetSource::Cached);
            }
        }

        match load_font(path) {
            Ok(font) => {
                let font = Arc::new(font);
                if let Some(cache) = &self.fonts {
                    lock(cache).put(path.clone(), Arc::clone(&font));
                }
                (FontSet::from_truetype(font), AssetSource::Loaded)
            }
            Err(reason) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %reason,
                    "Font unavailable, using built-in bitmap font"
                );
                (FontSet::builtin(), AssetSource::Fallback)
            }
        }
    }
}

/// Why an asset could not be used.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),

    #[error("not a valid TrueType font")]
    InvalidFont,
}

/// Read, decode and resample a background with a Lanczos filter.
pub fn load_background(path: &Path, width: u32, height: u32) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path)?;
    let decoded = image::load_from_memory(&bytes)?;
    Ok(decoded
        .resize_exact(width, height, FilterType::Lanczos3)
        .to_rgba8())
}

/// Read and parse a TrueType/OpenType font.
pub fn load_font(path: &Path) -> Result<Font<'static>, AssetError> {
    let bytes = std::fs::read(path)?;
    Font::try_from_vec(bytes).ok_or(AssetError::InvalidFont)
}
