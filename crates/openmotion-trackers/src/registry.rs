//! Tracker registry seam.
//!
//! The control path enumerates trackers through an injected
//! [`TrackerRegistry`] rather than a process-wide server instance. Lifecycle
//! code that creates and destroys trackers needs the writable
//! [`TrackerRegistryWriter`] half as well.

use std::collections::BTreeMap;

use openmotion_errors::TrackerError;
use parking_lot::RwLock;
use tracing::info;

use crate::binding::FilterControl;
use crate::id::TrackerId;

/// Source of per-tracker filter control handles.
pub trait TrackerRegistry: Send + Sync {
    /// Handles for every registered tracker, in id order.
    fn filter_controls(&self) -> Vec<FilterControl>;

    /// Handle for one tracker.
    fn filter_control(&self, id: TrackerId) -> Option<FilterControl>;
}

/// A [`TrackerRegistry`] that trackers can be added to and removed from.
pub trait TrackerRegistryWriter: TrackerRegistry {
    /// Add a tracker's control handle.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::DuplicateTracker`] if the id is taken.
    fn register(&self, control: FilterControl) -> Result<(), TrackerError>;

    /// Remove a tracker's control handle.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownTracker`] if the id is not registered.
    fn unregister(&self, id: TrackerId) -> Result<FilterControl, TrackerError>;
}

/// Registry backed by an in-process map.
#[derive(Debug, Default)]
pub struct InMemoryTrackerRegistry {
    controls: RwLock<BTreeMap<TrackerId, FilterControl>>,
}

impl InMemoryTrackerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: TrackerId) -> bool {
        self.controls.read().contains_key(&id)
    }

    /// Number of registered trackers.
    pub fn len(&self) -> usize {
        self.controls.read().len()
    }

    /// Whether no tracker is registered.
    pub fn is_empty(&self) -> bool {
        self.controls.read().is_empty()
    }
}

impl TrackerRegistry for InMemoryTrackerRegistry {
    fn filter_controls(&self) -> Vec<FilterControl> {
        self.controls.read().values().cloned().collect()
    }

    fn filter_control(&self, id: TrackerId) -> Option<FilterControl> {
        self.controls.read().get(&id).cloned()
    }
}

impl TrackerRegistryWriter for InMemoryTrackerRegistry {
    fn register(&self, control: FilterControl) -> Result<(), TrackerError> {
        let id = control.id();
        let mut controls = self.controls.write();
        if controls.contains_key(&id) {
            return Err(TrackerError::DuplicateTracker { tracker: id.get() });
        }
        controls.insert(id, control);
        info!(tracker = %id, "Tracker registered");
        Ok(())
    }

    fn unregister(&self, id: TrackerId) -> Result<FilterControl, TrackerError> {
        let removed = self
            .controls
            .write()
            .remove(&id)
            .ok_or(TrackerError::UnknownTracker { tracker: id.get() })?;
        info!(tracker = %id, "Tracker unregistered");
        Ok(removed)
    }
}
