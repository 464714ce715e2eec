//! Atomic counters for per-tracker filter bookkeeping.
//!
//! [`FilterCounters`] is written from the stepping loop and read from the
//! control path. Every update is a single `Relaxed` fetch-add: the counters do
//! not synchronize other memory, they only need to be eventually consistent.

use core::sync::atomic::{AtomicU64, Ordering};

/// Counter snapshot returned by [`FilterCounters::snapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Samples that went through a filter engine
    pub samples_filtered: u64,
    /// Samples returned unchanged because filtering was disabled
    pub samples_passthrough: u64,
    /// Samples refused at ingress (non-finite or degenerate rotation)
    pub samples_rejected: u64,
    /// Samples dropped for arriving older than the last accepted one
    pub samples_out_of_order: u64,
    /// Config snapshots picked up by the stepping loop
    pub config_swaps: u64,
    /// Filter history resets (mode change, re-enable, explicit reset)
    pub engine_resets: u64,
}

impl CounterSnapshot {
    /// Total samples offered to the binding, whatever happened to them.
    #[must_use]
    pub fn samples_seen(&self) -> u64 {
        self.samples_filtered
            .saturating_add(self.samples_passthrough)
            .saturating_add(self.samples_rejected)
            .saturating_add(self.samples_out_of_order)
    }
}

/// Lock-free counters owned by one tracker binding.
///
/// # Example
///
/// ```rust
/// use openmotion_atomic::FilterCounters;
///
/// let counters = FilterCounters::new();
/// counters.inc_filtered();
/// counters.inc_out_of_order();
///
/// let snapshot = counters.snapshot();
/// assert_eq!(snapshot.samples_seen(), 2);
/// ```
#[derive(Debug)]
pub struct FilterCounters {
    samples_filtered: AtomicU64,
    samples_passthrough: AtomicU64,
    samples_rejected: AtomicU64,
    samples_out_of_order: AtomicU64,
    config_swaps: AtomicU64,
    engine_resets: AtomicU64,
}

impl Default for FilterCounters {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterCounters {
    /// Create a new set of counters, all zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            samples_filtered: AtomicU64::new(0),
            samples_passthrough: AtomicU64::new(0),
            samples_rejected: AtomicU64::new(0),
            samples_out_of_order: AtomicU64::new(0),
            config_swaps: AtomicU64::new(0),
            engine_resets: AtomicU64::new(0),
        }
    }

    /// Record a sample that went through the filter engine.
    #[inline]
    pub fn inc_filtered(&self) {
        self.samples_filtered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a sample passed through with filtering disabled.
    #[inline]
    pub fn inc_passthrough(&self) {
        self.samples_passthrough.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a sample refused at ingress.
    #[inline]
    pub fn inc_rejected(&self) {
        self.samples_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a sample dropped for its timestamp.
    #[inline]
    pub fn inc_out_of_order(&self) {
        self.samples_out_of_order.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a config snapshot taking effect.
    #[inline]
    pub fn inc_config_swap(&self) {
        self.config_swaps.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a filter history reset.
    #[inline]
    pub fn inc_engine_reset(&self) {
        self.engine_resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Read all counters without resetting them.
    ///
    /// There is no atomic snapshot across counters; each value is read
    /// independently.
    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            samples_filtered: self.samples_filtered.load(Ordering::Relaxed),
            samples_passthrough: self.samples_passthrough.load(Ordering::Relaxed),
            samples_rejected: self.samples_rejected.load(Ordering::Relaxed),
            samples_out_of_order: self.samples_out_of_order.load(Ordering::Relaxed),
            config_swaps: self.config_swaps.load(Ordering::Relaxed),
            engine_resets: self.engine_resets.load(Ordering::Relaxed),
        }
    }

    /// Read and zero all counters.
    ///
    /// Each counter is swapped individually, so an increment racing with this
    /// call lands either in the returned snapshot or in the next one.
    #[must_use]
    pub fn snapshot_and_reset(&self) -> CounterSnapshot {
        CounterSnapshot {
            samples_filtered: self.samples_filtered.swap(0, Ordering::Relaxed),
            samples_passthrough: self.samples_passthrough.swap(0, Ordering::Relaxed),
            samples_rejected: self.samples_rejected.swap(0, Ordering::Relaxed),
            samples_out_of_order: self.samples_out_of_order.swap(0, Ordering::Relaxed),
            config_swaps: self.config_swaps.swap(0, Ordering::Relaxed),
            engine_resets: self.engine_resets.swap(0, Ordering::Relaxed),
        }
    }
}
