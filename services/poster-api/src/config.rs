//! Service configuration.

use std::path::{Path, PathBuf};

use poster_common::{PosterLabels, PosterResult};
use renderer::AssetConfig;

/// Default number of decoded assets kept in memory.
pub const DEFAULT_ASSET_CACHE_ENTRIES: usize = 4;

/// Everything the service needs after argument parsing.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory served under `/static`.
    pub static_dir: PathBuf,
    pub assets: AssetConfig,
    pub labels: PosterLabels,
    /// Prefix for download URLs, e.g. `https://posters.example.com`.
    /// Relative URLs are returned when unset.
    pub public_base_url: Option<String>,
}

impl ServiceConfig {
    /// Configuration with assets in their conventional places under `static_dir`.
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        let static_dir = static_dir.into();
        let assets = AssetConfig::new(
            static_dir.join("backgrounds/default.png"),
            static_dir.join("fonts/msyhbd.ttf"),
        )
        .with_cache_capacity(DEFAULT_ASSET_CACHE_ENTRIES);

        Self {
            static_dir,
            assets,
            labels: PosterLabels::default(),
            public_base_url: None,
        }
    }

    pub fn with_assets(mut self, assets: AssetConfig) -> Self {
        self.assets = assets;
        self
    }

    pub fn with_labels(mut self, labels: PosterLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_public_base_url(mut self, url: Option<String>) -> Self {
        self.public_base_url = url;
        self
    }

    /// Where persisted posters are written.
    pub fn posters_dir(&self) -> PathBuf {
        self.static_dir.join("posters")
    }

    /// Public URL of a persisted poster.
    pub fn download_url(&self, file_name: &str) -> String {
        let base = self
            .public_base_url
            .as_deref()
            .map(|b| b.trim_end_matches('/'))
            .unwrap_or("");
        format!("{}/static/posters/{}", base, file_name)
    }
}

/// Load the label table from `path`, or use the defaults.
pub fn load_labels(path: Option<&Path>) -> PosterResult<PosterLabels> {
    match path {
        Some(path) => PosterLabels::load_from_file(path),
        None => Ok(PosterLabels::default()),
    }
}
