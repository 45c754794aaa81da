//! Request counters, reported as `debug` tracing events

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics handle for recording counters
#[derive(Debug, Default)]
pub struct Metrics {
    thumbnails_rendered: AtomicU64,
    requests_rejected: AtomicU64,
    conversions_failed: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn thumbnail_rendered(&self) {
        self.thumbnails_rendered.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "thumbnails_rendered", "Metric incremented");
    }

    pub fn request_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "requests_rejected", "Metric incremented");
    }

    pub fn conversion_failed(&self) {
        self.conversions_failed.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "conversions_failed", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            thumbnails_rendered: self.thumbnails_rendered.load(Ordering::Relaxed),
            requests_rejected: self.requests_rejected.load(Ordering::Relaxed),
            conversions_failed: self.conversions_failed.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub thumbnails_rendered: u64,
    pub requests_rejected: u64,
    pub conversions_failed: u64,
}
