//! Store traffic counters.
//!
//! The client records every request and every ledger operation here. A
//! [`MetricsSnapshot`] is logged after each store call and once at shutdown.

use serde::Serialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Counters {
    http_requests: AtomicU64,
    http_errors: AtomicU64,
    http_time_ms: AtomicU64,
    lookups: AtomicU64,
    lookup_hits: AtomicU64,
    records_appended: AtomicU64,
    records_listed: AtomicU64,
}

/// Shared handle to the counters. Clones observe the same values.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub http_requests: u64,
    pub http_errors: u64,
    pub http_time_ms: u64,
    pub lookups: u64,
    pub lookup_hits: u64,
    pub records_appended: u64,
    pub records_listed: u64,
}

fn bump(counter: &AtomicU64, by: u64) {
    counter.fetch_add(by, Ordering::Relaxed);
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request and how long it took.
    pub fn record_http_request(&self, elapsed: Duration) {
        bump(&self.counters.http_requests, 1);
        bump(&self.counters.http_time_ms, elapsed.as_millis() as u64);
    }

    pub fn record_http_error(&self) {
        bump(&self.counters.http_errors, 1);
    }

    /// Count a lookup; it is a hit when anything matched.
    pub fn record_lookup(&self, matches: usize) {
        bump(&self.counters.lookups, 1);
        if matches > 0 {
            bump(&self.counters.lookup_hits, 1);
        }
    }

    pub fn record_append(&self) {
        bump(&self.counters.records_appended, 1);
    }

    pub fn record_listed(&self, count: usize) {
        bump(&self.counters.records_listed, count as u64);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let c = &self.counters;
        MetricsSnapshot {
            http_requests: c.http_requests.load(Ordering::Relaxed),
            http_errors: c.http_errors.load(Ordering::Relaxed),
            http_time_ms: c.http_time_ms.load(Ordering::Relaxed),
            lookups: c.lookups.load(Ordering::Relaxed),
            lookup_hits: c.lookup_hits.load(Ordering::Relaxed),
            records_appended: c.records_appended.load(Ordering::Relaxed),
            records_listed: c.records_listed.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSnapshot {
    /// Mean request time, or zero before the first request.
    pub fn mean_request_ms(&self) -> u64 {
        self.http_time_ms
            .checked_div(self.http_requests)
            .unwrap_or_default()
    }
}

impl fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requests={} errors={} mean_ms={} lookups={} hits={} appended={} listed={}",
            self.http_requests,
            self.http_errors,
            self.mean_request_ms(),
            self.lookups,
            self.lookup_hits,
            self.records_appended,
            self.records_listed
        )
    }
}

/// Times one HTTP request and records it on completion.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_metrics_are_zero() {
        assert_eq!(Metrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_clones_share_counters() {
        let metrics = Metrics::new();
        let other = metrics.clone();
        other.record_append();
        other.record_listed(3);

        let snap = metrics.snapshot();
        assert_eq!(snap.records_appended, 1);
        assert_eq!(snap.records_listed, 3);
    }

    #[test]
    fn test_lookup_hits_only_count_nonempty() {
        let metrics = Metrics::new();
        metrics.record_lookup(0);
        metrics.record_lookup(2);

        let snap = metrics.snapshot();
        assert_eq!(snap.lookups, 2);
        assert_eq!(snap.lookup_hits, 1);
    }

    #[test]
    fn test_mean_request_time() {
        let metrics = Metrics::new();
        assert_eq!(metrics.snapshot().mean_request_ms(), 0);

        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(200));
        let snap = metrics.snapshot();
        assert_eq!(snap.http_time_ms, 300);
        assert_eq!(snap.mean_request_ms(), 150);
    }

    #[test]
    fn test_timer_with_error() {
        let metrics = Metrics::new();
        HttpTimer::new(metrics.clone()).complete_with_error();

        let snap = metrics.snapshot();
        assert_eq!(snap.http_requests, 1);
        assert_eq!(snap.http_errors, 1);
    }

    #[test]
    fn test_snapshot_display_and_json() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(40));
        metrics.record_lookup(1);

        let snap = metrics.snapshot();
        assert_eq!(
            snap.to_string(),
            "requests=1 errors=0 mean_ms=40 lookups=1 hits=1 appended=0 listed=0"
        );

        let json = serde_json::to_value(snap).unwrap();
        assert_eq!(json["lookup_hits"], 1);
        assert_eq!(json["http_time_ms"], 40);
    }

    #[test]
    fn test_concurrent_appends() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let m = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        m.record_append();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.snapshot().records_appended, 200);
    }
}
