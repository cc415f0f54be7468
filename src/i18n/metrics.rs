//! Lookup metrics and observability module.
//!
//! Counts translation lookups, keys that failed to resolve, and structured
//! lookups whose data did not have the expected shape.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;

/// Global lookup metrics singleton.
pub struct LookupMetrics {
    /// Number of lookups performed
    lookups: AtomicUsize,

    /// Number of lookups whose key did not resolve
    misses: AtomicUsize,

    /// Number of structured lookups rejected by the shape check
    shape_mismatches: AtomicUsize,
}

/// Global metrics instance (initialized lazily)
static METRICS: OnceLock<LookupMetrics> = OnceLock::new();

impl LookupMetrics {
    /// Get the global lookup metrics instance.
    pub fn global() -> &'static LookupMetrics {
        METRICS.get_or_init(|| LookupMetrics {
            lookups: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            shape_mismatches: AtomicUsize::new(0),
        })
    }

    pub fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_shape_mismatch(&self) {
        self.shape_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn shape_mismatches(&self) -> usize {
        self.shape_mismatches.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let lookups = self.lookups();
        let misses = self.misses().min(lookups);
        let hit_rate = if lookups > 0 {
            ((lookups - misses) as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            misses,
            shape_mismatches: self.shape_mismatches(),
            hit_rate,
        }
    }
}

/// Metrics report containing current lookup statistics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    /// Number of lookups performed
    pub lookups: usize,

    /// Number of lookups that did not resolve
    pub misses: usize,

    /// Number of structured lookups with an unexpected shape
    pub shape_mismatches: usize,

    /// Resolved lookups as a percentage (0-100)
    pub hit_rate: f64,
}
