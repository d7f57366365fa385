//! Internal counters for rJolokia-Input
//!
//! These track the gatherer's own operation across sweeps so that failures
//! are counted rather than dropped.
//!
//! - `requests_total` - Jolokia requests attempted
//! - `request_failures_total{kind="..."}` - per-request failures by error class
//! - `mbean_errors_total` - MBeans skipped because of a malformed name
//! - `measurements_total` - measurements handed to the sink
//! - `request_duration_seconds` - histogram of request durations

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Default histogram buckets for request duration (in seconds)
pub const DEFAULT_HISTOGRAM_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Thread-safe counter using atomic operations
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    /// Create a new counter initialized to 0
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    /// Increment the counter by 1
    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment the counter by a specific amount
    pub fn inc_by(&self, n: u64) {
        self.value.fetch_add(n, Ordering::Relaxed);
    }

    /// Get the current value
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Thread-safe histogram for measuring distributions
#[derive(Debug)]
pub struct Histogram {
    /// Bucket boundaries (upper bounds)
    buckets: Vec<f64>,
    /// Bucket counters (count of observations <= bucket boundary)
    bucket_counts: Vec<AtomicU64>,
    /// Sum of all observed values
    sum: AtomicU64,
    /// Total count of observations
    count: AtomicU64,
}

impl Histogram {
    /// Create a new histogram with the given bucket boundaries
    pub fn new(buckets: &[f64]) -> Self {
        let mut sorted_buckets: Vec<f64> = buckets.to_vec();
        sorted_buckets.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        // Add +Inf bucket if not present
        if sorted_buckets
            .last()
            .map(|v| !v.is_infinite())
            .unwrap_or(true)
        {
            sorted_buckets.push(f64::INFINITY);
        }

        let bucket_counts = (0..sorted_buckets.len())
            .map(|_| AtomicU64::new(0))
            .collect();

        Self {
            buckets: sorted_buckets,
            bucket_counts,
            sum: AtomicU64::new(0.0_f64.to_bits()),
            count: AtomicU64::new(0),
        }
    }

    /// Create a histogram with default buckets for request durations
    pub fn with_default_buckets() -> Self {
        Self::new(DEFAULT_HISTOGRAM_BUCKETS)
    }

    /// Observe a value
    pub fn observe(&self, v: f64) {
        self.count.fetch_add(1, Ordering::Relaxed);

        // Atomic f64 add
        loop {
            let current = self.sum.load(Ordering::Relaxed);
            let new = f64::from_bits(current) + v;
            if self
                .sum
                .compare_exchange_weak(current, new.to_bits(), Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }

        for (i, &bound) in self.buckets.iter().enumerate() {
            if v <= bound {
                self.bucket_counts[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Get the sum of all observations
    pub fn get_sum(&self) -> f64 {
        f64::from_bits(self.sum.load(Ordering::Relaxed))
    }

    /// Get the total count of observations
    pub fn get_count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Get bucket boundaries and their cumulative counts
    pub fn get_buckets(&self) -> Vec<(f64, u64)> {
        self.buckets
            .iter()
            .zip(self.bucket_counts.iter())
            .map(|(&bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }

    /// Smallest bucket bound that covers every observation
    ///
    /// Returns `None` before the first observation.
    pub fn upper_bound(&self) -> Option<f64> {
        let total = self.get_count();
        if total == 0 {
            return None;
        }
        self.get_buckets()
            .into_iter()
            .find(|&(_, count)| count >= total)
            .map(|(bound, _)| bound)
    }

    /// Mean of all observations, `None` before the first one
    pub fn mean(&self) -> Option<f64> {
        match self.get_count() {
            0 => None,
            n => Some(self.get_sum() / n as f64),
        }
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::with_default_buckets()
    }
}

/// Gatherer counters, shared across sweeps
#[derive(Debug, Default)]
pub struct GatherMetrics {
    /// Requests attempted
    pub requests_total: Counter,
    /// MBeans skipped because of a malformed name
    pub mbean_errors_total: Counter,
    /// Measurements handed to the sink
    pub measurements_total: Counter,
    /// Request durations
    pub request_duration_seconds: Histogram,
    /// Per-request failures keyed by error class
    failures: RwLock<BTreeMap<&'static str, u64>>,
}

impl GatherMetrics {
    /// Create a new, zeroed registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a per-request failure of the given class
    pub fn record_failure(&self, kind: &'static str) {
        let mut failures = self.failures.write().unwrap_or_else(|e| e.into_inner());
        *failures.entry(kind).or_insert(0) += 1;
    }

    /// Failure counts by error class
    pub fn failures_by_kind(&self) -> BTreeMap<&'static str, u64> {
        self.failures
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Total per-request failures
    pub fn failures_total(&self) -> u64 {
        self.failures_by_kind().values().sum()
    }
}
