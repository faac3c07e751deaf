//! Request and render metrics.
//!
//! Counters are mirrored into the `metrics` facade (exported to Prometheus at
//! `/metrics`) and kept locally for the JSON view at `/api/metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use metrics::{counter, histogram};
use serde::Serialize;

/// Route label values.
pub mod route {
    pub const UPLOAD: &str = "upload";
    pub const THERMAL: &str = "thermal";
    pub const PUSH: &str = "push";
    pub const CONVERT: &str = "convert";
    pub const DEBUG: &str = "debug";
}

/// Process-wide render counters.
pub struct MetricsCollector {
    frames_rendered: AtomicU64,
    render_errors: AtomicU64,
    client_errors: AtomicU64,
    pushes_succeeded: AtomicU64,
    pushes_failed: AtomicU64,
    render_time_us_total: AtomicU64,
    start_time: Instant,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub frames_rendered: u64,
    pub render_errors: u64,
    pub client_errors: u64,
    pub pushes_succeeded: u64,
    pub pushes_failed: u64,
    pub avg_render_ms: f64,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            frames_rendered: AtomicU64::new(0),
            render_errors: AtomicU64::new(0),
            client_errors: AtomicU64::new(0),
            pushes_succeeded: AtomicU64::new(0),
            pushes_failed: AtomicU64::new(0),
            render_time_us_total: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a successful render and how long it took.
    pub fn record_render(&self, route: &'static str, elapsed: Duration) {
        self.frames_rendered.fetch_add(1, Ordering::Relaxed);
        self.render_time_us_total
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);

        counter!("thermal_frames_rendered_total", "route" => route).increment(1);
        histogram!("thermal_render_duration_ms", "route" => route)
            .record(elapsed.as_secs_f64() * 1000.0);
    }

    /// Record a failed request. Client errors (bad input) are tracked
    /// separately from render failures.
    pub fn record_error(&self, route: &'static str, client_error: bool) {
        if client_error {
            self.client_errors.fetch_add(1, Ordering::Relaxed);
            counter!("thermal_client_errors_total", "route" => route).increment(1);
        } else {
            self.render_errors.fetch_add(1, Ordering::Relaxed);
            counter!("thermal_render_errors_total", "route" => route).increment(1);
        }
    }

    /// Record the outcome of a webcam push.
    pub fn record_push(&self, success: bool) {
        let outcome = if success {
            self.pushes_succeeded.fetch_add(1, Ordering::Relaxed);
            "success"
        } else {
            self.pushes_failed.fetch_add(1, Ordering::Relaxed);
            "failure"
        };
        counter!("thermal_upstream_push_total", "outcome" => outcome).increment(1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let frames = self.frames_rendered.load(Ordering::Relaxed);
        let total_us = self.render_time_us_total.load(Ordering::Relaxed);
        let avg_render_ms = if frames > 0 {
            total_us as f64 / frames as f64 / 1000.0
        } else {
            0.0
        };

        MetricsSnapshot {
            uptime_secs: self.start_time.elapsed().as_secs(),
            frames_rendered: frames,
            render_errors: self.render_errors.load(Ordering::Relaxed),
            client_errors: self.client_errors.load(Ordering::Relaxed),
            pushes_succeeded: self.pushes_succeeded.load(Ordering::Relaxed),
            pushes_failed: self.pushes_failed.load(Ordering::Relaxed),
            avg_render_ms,
        }
    }
}
