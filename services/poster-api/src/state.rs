//! Application state and shared resources.

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use renderer::PosterRenderer;

use crate::config::ServiceConfig;
use crate::metrics::PosterMetrics;
use crate::storage::PosterStorage;

/// Shared application state.
pub struct AppState {
    pub config: ServiceConfig,
    pub renderer: Arc<PosterRenderer>,
    pub storage: PosterStorage,
    pub metrics: Arc<PosterMetrics>,
    pub prometheus: PrometheusHandle,
}

impl AppState {
    /// Build the renderer and prepare the output directory.
    ///
    /// Missing asset files are only warned about; renders fall back.
    pub fn new(config: ServiceConfig, prometheus: PrometheusHandle) -> Result<Self> {
        config.assets.warn_missing();

        let renderer = PosterRenderer::new(config.assets.clone())
            .context("invalid asset configuration")?
            .with_labels(config.labels.clone());

        let posters_dir = config.posters_dir();
        let storage = PosterStorage::open(&posters_dir).with_context(|| {
            format!("failed to create output directory {}", posters_dir.display())
        })?;

        Ok(Self {
            config,
            renderer: Arc::new(renderer),
            storage,
            metrics: Arc::new(PosterMetrics::new()),
            prometheus,
        })
    }
}
