//! Weather Poster API Server
//!
//! Renders weather records into 540x960 PNG posters over HTTP.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use poster_api::config::{load_labels, ServiceConfig, DEFAULT_ASSET_CACHE_ENTRIES};
use poster_api::state::AppState;
use renderer::AssetConfig;

/// Weather Poster API Server
#[derive(Parser, Debug)]
#[command(name = "poster-api")]
#[command(about = "HTTP server that renders weather posters")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:8000", env = "POSTER_LISTEN_ADDR")]
    listen: String,

    /// Log level
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Number of worker threads
    #[arg(long, env = "POSTER_WORKER_THREADS")]
    worker_threads: Option<usize>,

    /// Directory served under /static; posters are written to its posters/ subdirectory
    #[arg(long, default_value = "static", env = "POSTER_STATIC_DIR")]
    static_dir: PathBuf,

    /// Background image
    #[arg(long, default_value = "static/backgrounds/default.png", env = "POSTER_BACKGROUND")]
    background: PathBuf,

    /// TrueType font with CJK coverage
    #[arg(long, default_value = "static/fonts/msyhbd.ttf", env = "POSTER_FONT")]
    font: PathBuf,

    /// YAML label table overriding the default row labels
    #[arg(long, env = "POSTER_LABELS")]
    labels: Option<PathBuf>,

    /// Prefix for download URLs
    #[arg(long, env = "POSTER_PUBLIC_BASE_URL")]
    public_base_url: Option<String>,

    /// Decoded assets kept in memory (0 disables caching)
    #[arg(long, default_value_t = DEFAULT_ASSET_CACHE_ENTRIES, env = "POSTER_ASSET_CACHE_ENTRIES")]
    asset_cache_entries: usize,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Build runtime with configured threads
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(threads) = args.worker_threads {
        runtime_builder.worker_threads(threads);
    }

    let runtime = runtime_builder.build()?;
    runtime.block_on(run_server(args))
}

async fn run_server(args: Args) -> Result<()> {
    // Initialize tracing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .json()
        .init();

    // Initialize Prometheus metrics exporter
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    info!("Starting Weather Poster API server");

    let labels = load_labels(args.labels.as_deref())?;
    let assets = AssetConfig::new(&args.background, &args.font)
        .with_cache_capacity(args.asset_cache_entries);
    let config = ServiceConfig::new(&args.static_dir)
        .with_assets(assets)
        .with_labels(labels)
        .with_public_base_url(args.public_base_url);

    info!(
        static_dir = %config.static_dir.display(),
        background = %config.assets.background_path.display(),
        font = %config.assets.font_path.display(),
        cache_entries = config.assets.cache_capacity,
        "Configuration loaded"
    );

    // Initialize application state
    let state = Arc::new(AppState::new(config, prometheus_handle)?);
    let app = poster_api::build_router(state);

    // Parse listen address
    let addr: SocketAddr = args.listen.parse().context("Invalid listen address")?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
