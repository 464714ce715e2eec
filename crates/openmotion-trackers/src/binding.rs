//! Tracker filter binding and its control handle.
//!
//! A tracker's filtering is split in two halves:
//!
//! - [`TrackerFilterBinding`] owns the [`FilterEngine`] and lives on the
//!   stepping loop. It is `Send` but used through `&mut self` only.
//! - [`FilterControl`] is a cheap, cloneable handle for the control path. It
//!   publishes whole configurations into a single-slot mailbox and flips the
//!   `allowFiltering` flag, both without locks.
//!
//! The binding drains the mailbox at the start of every update, so a complete
//! step always runs against one configuration snapshot.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use openmotion_atomic::{CounterSnapshot, FilterCounters, Mailbox};
use openmotion_errors::SampleResult;
use openmotion_filters::{FilterConfig, FilterEngine, FilterMode, Rotation, RotationSample};
use tracing::{debug, warn};

use crate::id::TrackerId;

/// State shared between a binding and its control handles.
#[derive(Debug)]
struct SharedFilterState {
    pending_config: Mailbox<FilterConfig>,
    allow_filtering: AtomicBool,
    counters: FilterCounters,
}

/// Stepping-side filter state of one tracker.
///
/// # Example
///
/// ```
/// use openmotion_filters::{FilterConfig, FilterMode};
/// use openmotion_trackers::{TrackerFilterBinding, TrackerId};
///
/// let (mut binding, control) =
///     TrackerFilterBinding::new(TrackerId::new(1), true, FilterConfig::default());
///
/// // Control path, any thread.
/// control.apply_config(FilterConfig::default().with_mode(FilterMode::Smoothing));
///
/// // Stepping loop: the swap lands at the start of the next update.
/// let out = binding.update_raw([1.0, 0.0, 0.0, 0.0], 0)?;
/// assert_eq!(binding.engine().mode(), FilterMode::Smoothing);
/// assert!((out.quaternion().norm() - 1.0).abs() < 1e-6);
/// # Ok::<(), openmotion_errors::SampleError>(())
/// ```
#[derive(Debug)]
pub struct TrackerFilterBinding {
    id: TrackerId,
    shared: Arc<SharedFilterState>,
    engine: FilterEngine,
    filtering: bool,
}

impl TrackerFilterBinding {
    /// Create a binding and the control handle that reconfigures it.
    pub fn new(id: TrackerId, allow_filtering: bool, config: FilterConfig) -> (Self, FilterControl) {
        let shared = Arc::new(SharedFilterState {
            pending_config: Mailbox::new(),
            allow_filtering: AtomicBool::new(allow_filtering),
            counters: FilterCounters::new(),
        });
        let control = FilterControl {
            id,
            shared: Arc::clone(&shared),
        };
        let binding = Self {
            id,
            shared,
            engine: FilterEngine::new(config),
            filtering: allow_filtering,
        };
        (binding, control)
    }

    /// Tracker this binding filters.
    pub fn id(&self) -> TrackerId {
        self.id
    }

    /// Filter engine, for inspection.
    pub fn engine(&self) -> &FilterEngine {
        &self.engine
    }

    /// Another control handle for this binding.
    pub fn control(&self) -> FilterControl {
        FilterControl {
            id: self.id,
            shared: Arc::clone(&self.shared),
        }
    }

    /// Filter one validated sample.
    ///
    /// With filtering disallowed this returns the raw rotation and leaves the
    /// engine untouched. The engine is reset when filtering is allowed again,
    /// since its history predates the gap.
    pub fn update(&mut self, sample: &RotationSample) -> Rotation {
        self.apply_pending_config();

        let counters = &self.shared.counters;
        if !self.shared.allow_filtering.load(Ordering::Acquire) {
            self.filtering = false;
            counters.inc_passthrough();
            return sample.rotation();
        }

        if !self.filtering {
            self.engine.reset();
            self.filtering = true;
            counters.inc_engine_reset();
            debug!(tracker = %self.id, "Filtering re-enabled, engine reset");
        }

        if self.engine.is_out_of_order(sample) {
            counters.inc_out_of_order();
            warn!(
                tracker = %self.id,
                timestamp_ns = sample.timestamp_ns(),
                last_timestamp_ns = ?self.engine.last_timestamp_ns(),
                "Dropped out-of-order sample"
            );
        } else if self.engine.mode() == FilterMode::None {
            counters.inc_passthrough();
        } else {
            counters.inc_filtered();
        }

        self.engine.step(sample)
    }

    /// Validate raw `[w, x, y, z]` components and filter them.
    ///
    /// # Errors
    ///
    /// Returns the ingress error if the components are non-finite or cannot be
    /// normalized. The sample is dropped and filter state is kept.
    pub fn update_raw(&mut self, wxyz: [f32; 4], timestamp_ns: u64) -> SampleResult<Rotation> {
        match RotationSample::new(wxyz, timestamp_ns) {
            Ok(sample) => Ok(self.update(&sample)),
            Err(error) => {
                self.shared.counters.inc_rejected();
                warn!(tracker = %self.id, %error, "Rejected raw sample");
                Err(error)
            }
        }
    }

    fn apply_pending_config(&mut self) {
        let Some(config) = self.shared.pending_config.take() else {
            return;
        };

        let reset = self.engine.reconfigure(config);
        let counters = &self.shared.counters;
        counters.inc_config_swap();
        if reset {
            counters.inc_engine_reset();
        }
        debug!(tracker = %self.id, mode = %config.mode(), reset, "Applied filter config");
    }
}

/// Control-path handle for one tracker's filtering.
///
/// Cloneable and `Send + Sync`; every method is lock-free and safe to call
/// while the binding is stepping on another thread.
#[derive(Debug, Clone)]
pub struct FilterControl {
    id: TrackerId,
    shared: Arc<SharedFilterState>,
}

impl FilterControl {
    /// Tracker this handle controls.
    pub fn id(&self) -> TrackerId {
        self.id
    }

    /// Queue `config` to replace the active configuration at the start of the
    /// next update. A newer call replaces a still-pending one.
    ///
    /// Returns `true` if a pending configuration was superseded.
    pub fn apply_config(&self, config: FilterConfig) -> bool {
        self.shared.pending_config.publish(config)
    }

    /// Whether a configuration is waiting for the stepping loop.
    pub fn has_pending_config(&self) -> bool {
        self.shared.pending_config.is_pending()
    }

    /// Whether filtering is currently allowed for this tracker.
    pub fn allow_filtering(&self) -> bool {
        self.shared.allow_filtering.load(Ordering::Acquire)
    }

    /// Allow or disallow filtering. Returns the previous setting.
    ///
    /// The attached configuration is kept either way.
    pub fn set_allow_filtering(&self, allow: bool) -> bool {
        self.shared.allow_filtering.swap(allow, Ordering::AcqRel)
    }

    /// Current counter values.
    pub fn counters(&self) -> CounterSnapshot {
        self.shared.counters.snapshot()
    }
}
