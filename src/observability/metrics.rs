//! Metrics registry
//!
//! - Counters only
//! - Monotonic increase
//! - Reset only on process start

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for one [`FormService`](crate::core::FormService).
///
/// Relaxed ordering: counters are independent and only read for reporting.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    forms_created: AtomicU64,
    forms_updated: AtomicU64,
    submissions_created: AtomicU64,
    submissions_rejected: AtomicU64,
    reads: AtomicU64,
    storage_failures: AtomicU64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_forms_created(&self) {
        self.forms_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_forms_updated(&self) {
        self.forms_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_submissions_created(&self) {
        self.submissions_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_submissions_rejected(&self) {
        self.submissions_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_reads(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_storage_failures(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            forms_created: self.forms_created.load(Ordering::Relaxed),
            forms_updated: self.forms_updated.load(Ordering::Relaxed),
            submissions_created: self.submissions_created.load(Ordering::Relaxed),
            submissions_rejected: self.submissions_rejected.load(Ordering::Relaxed),
            reads: self.reads.load(Ordering::Relaxed),
            storage_failures: self.storage_failures.load(Ordering::Relaxed),
        }
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub forms_created: u64,
    pub forms_updated: u64,
    pub submissions_created: u64,
    pub submissions_rejected: u64,
    pub reads: u64,
    pub storage_failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(MetricsRegistry::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_counters_are_independent() {
        let metrics = MetricsRegistry::new();
        metrics.increment_forms_created();
        metrics.increment_submissions_created();
        metrics.increment_submissions_created();
        metrics.increment_submissions_rejected();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.forms_created, 1);
        assert_eq!(snapshot.forms_updated, 0);
        assert_eq!(snapshot.submissions_created, 2);
        assert_eq!(snapshot.submissions_rejected, 1);
    }

    #[test]
    fn test_snapshot_serializes() {
        let metrics = MetricsRegistry::new();
        metrics.increment_reads();

        let json = serde_json::to_value(metrics.snapshot()).unwrap();
        assert_eq!(json["reads"], 1);
        assert_eq!(json["storage_failures"], 0);
    }
}
