//! Prelude for the trackers crate.
//!
//! Re-exports the binding types together with the filter types they take.

pub use crate::bank::FilterBank;
pub use crate::binding::{FilterControl, TrackerFilterBinding};
pub use crate::id::TrackerId;
pub use crate::lifecycle::{register_tracker, unregister_tracker};
pub use crate::registry::{InMemoryTrackerRegistry, TrackerRegistry, TrackerRegistryWriter};
pub use crate::settings::FiltersSettings;

pub use openmotion_filters::{FilterConfig, FilterMode, RawFilterConfig, Rotation, RotationSample};
