//! Stepping-side collection of tracker bindings.

use std::collections::BTreeMap;

use openmotion_errors::{OpenMotionError, TrackerError};
use openmotion_filters::{Rotation, RotationSample};

use crate::binding::TrackerFilterBinding;
use crate::id::TrackerId;

/// All tracker bindings driven by one update loop.
///
/// Owned by the loop and used through `&mut self`, so stepping needs no lock.
#[derive(Debug, Default)]
pub struct FilterBank {
    bindings: BTreeMap<TrackerId, TrackerFilterBinding>,
}

impl FilterBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::DuplicateTracker`] if the id is taken; the
    /// binding is dropped.
    pub fn insert(&mut self, binding: TrackerFilterBinding) -> Result<(), TrackerError> {
        let id = binding.id();
        if self.bindings.contains_key(&id) {
            return Err(TrackerError::DuplicateTracker { tracker: id.get() });
        }
        self.bindings.insert(id, binding);
        Ok(())
    }

    /// Remove and return a binding.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownTracker`] if the id is not present.
    pub fn remove(&mut self, id: TrackerId) -> Result<TrackerFilterBinding, TrackerError> {
        self.bindings
            .remove(&id)
            .ok_or(TrackerError::UnknownTracker { tracker: id.get() })
    }

    /// Filter a validated sample for tracker `id`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownTracker`] if the id is not present.
    pub fn update(&mut self, id: TrackerId, sample: &RotationSample) -> Result<Rotation, TrackerError> {
        self.bindings
            .get_mut(&id)
            .map(|binding| binding.update(sample))
            .ok_or(TrackerError::UnknownTracker { tracker: id.get() })
    }

    /// Validate and filter raw `[w, x, y, z]` components for tracker `id`.
    ///
    /// # Errors
    ///
    /// Returns a tracker error for an unknown id, or a sample error if the
    /// components are rejected at ingress.
    pub fn update_raw(
        &mut self,
        id: TrackerId,
        wxyz: [f32; 4],
        timestamp_ns: u64,
    ) -> Result<Rotation, OpenMotionError> {
        let binding = self
            .bindings
            .get_mut(&id)
            .ok_or(TrackerError::UnknownTracker { tracker: id.get() })?;
        Ok(binding.update_raw(wxyz, timestamp_ns)?)
    }

    /// Binding for `id`, for inspection.
    pub fn get(&self, id: TrackerId) -> Option<&TrackerFilterBinding> {
        self.bindings.get(&id)
    }

    /// Whether `id` is present.
    pub fn contains(&self, id: TrackerId) -> bool {
        self.bindings.contains_key(&id)
    }

    /// Tracker ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TrackerId> + '_ {
        self.bindings.keys().copied()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the bank is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
