//! Application metrics collection and reporting.

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::RwLock;

use renderer::RenderDiagnostics;

/// Metrics collector for the poster API.
#[derive(Debug)]
pub struct PosterMetrics {
    /// Request counts
    pub poster_requests: AtomicU64,
    pub invalid_requests: AtomicU64,

    /// Render stats
    pub renders_total: AtomicU64,
    pub render_errors: AtomicU64,
    pub background_fallbacks: AtomicU64,
    pub font_fallbacks: AtomicU64,
    pub posters_persisted: AtomicU64,

    /// Timing stats (stored as microseconds)
    render_times: RwLock<TimingStats>,

    /// Start time for uptime calculation
    start_time: Instant,
}

#[derive(Debug, Default)]
struct TimingStats {
    count: u64,
    total_us: u64,
    min_us: u64,
    max_us: u64,
    last_us: u64,
}

impl TimingStats {
    fn record(&mut self, duration_us: u64) {
        self.count += 1;
        self.total_us += duration_us;
        self.last_us = duration_us;
        if self.count == 1 || duration_us < self.min_us {
            self.min_us = duration_us;
        }
        if duration_us > self.max_us {
            self.max_us = duration_us;
        }
    }

    fn avg_ms(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.total_us as f64 / self.count as f64) / 1000.0
        }
    }
}

impl PosterMetrics {
    pub fn new() -> Self {
        Self {
            poster_requests: AtomicU64::new(0),
            invalid_requests: AtomicU64::new(0),
            renders_total: AtomicU64::new(0),
            render_errors: AtomicU64::new(0),
            background_fallbacks: AtomicU64::new(0),
            font_fallbacks: AtomicU64::new(0),
            posters_persisted: AtomicU64::new(0),
            render_times: RwLock::new(TimingStats::default()),
            start_time: Instant::now(),
        }
    }

    /// Record an incoming poster request
    pub fn record_request(&self) {
        self.poster_requests.fetch_add(1, Ordering::Relaxed);
        counter!("poster_requests_total").increment(1);
    }

    /// Record a request rejected for invalid input
    pub fn record_invalid_request(&self) {
        self.invalid_requests.fetch_add(1, Ordering::Relaxed);
        counter!("poster_invalid_requests_total").increment(1);
    }

    /// Record a render attempt
    pub async fn record_render(&self, duration_us: u64, success: bool) {
        self.renders_total.fetch_add(1, Ordering::Relaxed);
        counter!("poster_renders_total").increment(1);
        if !success {
            self.render_errors.fetch_add(1, Ordering::Relaxed);
            counter!("poster_render_errors_total").increment(1);
            return;
        }
        histogram!("poster_render_duration_ms").record(duration_us as f64 / 1000.0);

        let mut times = self.render_times.write().await;
        times.record(duration_us);
    }

    /// Record which assets a successful render fell back on
    pub fn record_diagnostics(&self, diagnostics: &RenderDiagnostics) {
        if diagnostics.background.is_fallback() {
            self.background_fallbacks.fetch_add(1, Ordering::Relaxed);
            counter!("poster_background_fallbacks_total").increment(1);
        }
        if diagnostics.font.is_fallback() {
            self.font_fallbacks.fetch_add(1, Ordering::Relaxed);
            counter!("poster_font_fallbacks_total").increment(1);
        }
    }

    /// Record a poster written to the static directory
    pub fn record_persisted(&self, bytes: usize) {
        self.posters_persisted.fetch_add(1, Ordering::Relaxed);
        counter!("poster_files_persisted_total").increment(1);
        histogram!("poster_file_bytes").record(bytes as f64);
    }

    /// Get current metrics snapshot
    pub async fn snapshot(&self) -> MetricsSnapshot {
        let render_times = self.render_times.read().await;

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            poster_requests: self.poster_requests.load(Ordering::Relaxed),
            invalid_requests: self.invalid_requests.load(Ordering::Relaxed),
            renders_total: self.renders_total.load(Ordering::Relaxed),
            render_errors: self.render_errors.load(Ordering::Relaxed),
            background_fallbacks: self.background_fallbacks.load(Ordering::Relaxed),
            font_fallbacks: self.font_fallbacks.load(Ordering::Relaxed),
            posters_persisted: self.posters_persisted.load(Ordering::Relaxed),
            render_count: render_times.count,
            render_avg_ms: render_times.avg_ms(),
            render_min_ms: render_times.min_us as f64 / 1000.0,
            render_max_ms: render_times.max_us as f64 / 1000.0,
            render_last_ms: render_times.last_us as f64 / 1000.0,
        }
    }
}

impl Default for PosterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of current metrics for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,

    // Request counts
    pub poster_requests: u64,
    pub invalid_requests: u64,

    // Render stats
    pub renders_total: u64,
    pub render_errors: u64,
    pub background_fallbacks: u64,
    pub font_fallbacks: u64,
    pub posters_persisted: u64,

    // Successful render timing
    pub render_count: u64,
    pub render_avg_ms: f64,
    pub render_min_ms: f64,
    pub render_max_ms: f64,
    pub render_last_ms: f64,
}

/// Timer for measuring operation duration.
pub struct Timer {
    start: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::AssetSource;
    use std::time::Duration;

    #[tokio::test]
    async fn test_render_timing() {
        let metrics = PosterMetrics::new();
        metrics.record_render(2_000, true).await;
        metrics.record_render(4_000, true).await;
        metrics.record_render(9_000, false).await;

        let snapshot = metrics.snapshot().await;
        assert_eq!(snapshot.renders_total, 3);
        assert_eq!(snapshot.render_errors, 1);
        assert_eq!(snapshot.render_count, 2);
        assert_eq!(snapshot.render_avg_ms, 3.0);
        assert_eq!(snapshot.render_min_ms, 2.0);
        assert_eq!(snapshot.render_max_ms, 4.0);
        assert_eq!(snapshot.render_last_ms, 4.0);
    }

    #[tokio::test]
    async fn test_fallback_counters() {
        let metrics = PosterMetrics::new();
        metrics.record_diagnostics(&RenderDiagnostics {
            background: AssetSource::Fallback,
            font: AssetSource::Cached,
            elapsed: Duration::ZERO,
        });

        let snapshot = metrics.snapshot().await;
        assert_eq!(snapshot.background_fallbacks, 1);
        assert_eq!(snapshot.font_fallbacks, 0);
    }
}
