//! Per-Tracker Filter Bindings for OpenMotion
//!
//! This crate ties the filter engine to the tracker lifecycle and to the
//! control path that reconfigures it while the update loop runs.
//!
//! # Architecture
//!
//! - [`TrackerFilterBinding`]: owns a tracker's engine, lives on the update loop
//! - [`FilterControl`]: lock-free handle to queue configs and toggle filtering
//! - [`FilterBank`]: the update loop's set of bindings, keyed by [`TrackerId`]
//! - [`TrackerRegistry`]: injected source of control handles
//! - [`FiltersSettings`]: shared default config and the global apply
//!
//! # Example
//!
//! ```
//! use openmotion_trackers::prelude::*;
//!
//! let mut bank = FilterBank::new();
//! let registry = InMemoryTrackerRegistry::new();
//! let settings = FiltersSettings::default();
//!
//! register_tracker(&mut bank, &registry, TrackerId::new(1), true, *settings.current())?;
//! register_tracker(&mut bank, &registry, TrackerId::new(2), false, *settings.current())?;
//!
//! // Operator switches everyone to smoothing.
//! settings.set(FilterConfig::default().with_mode(FilterMode::Smoothing));
//! assert_eq!(settings.update_trackers_filters(&registry), 1);
//!
//! // The update loop picks it up on the next sample.
//! let sample = RotationSample::new([1.0, 0.0, 0.0, 0.0], 0)?;
//! bank.update(TrackerId::new(1), &sample)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(static_mut_refs)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bank;
pub mod binding;
pub mod id;
pub mod lifecycle;
pub mod prelude;
pub mod registry;
pub mod settings;

pub use bank::FilterBank;
pub use binding::{FilterControl, TrackerFilterBinding};
pub use id::TrackerId;
pub use lifecycle::{register_tracker, unregister_tracker};
pub use registry::{InMemoryTrackerRegistry, TrackerRegistry, TrackerRegistryWriter};
pub use settings::FiltersSettings;
