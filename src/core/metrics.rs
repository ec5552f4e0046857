//! Dispatch metrics
//!
//! Backend write failures never reach the caller of a log function; these
//! counters are the only place they remain visible.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for dispatcher health
///
/// # Example
///
/// ```
/// use rust_log_dispatcher::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Log calls broadcast to an installed chain
    dispatched: AtomicU64,

    /// Backend writes that returned an error
    write_failures: AtomicU64,

    /// Backend calls that panicked
    backend_panics: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            backend_panics: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn backend_panics(&self) -> u64 {
        self.backend_panics.load(Ordering::Relaxed)
    }

    /// Record a dispatched call, returning the previous count
    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_backend_panic(&self) -> u64 {
        self.backend_panics.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.backend_panics.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            write_failures: AtomicU64::new(self.write_failures()),
            backend_panics: AtomicU64::new(self.backend_panics()),
        }
    }
}
