//! Tracker lifecycle helpers.
//!
//! A tracker's filtering has two halves that must appear and disappear
//! together: the binding in the stepping loop's [`FilterBank`] and the control
//! handle in the injected [`TrackerRegistryWriter`].

use openmotion_errors::TrackerError;
use openmotion_filters::FilterConfig;
use tracing::info;

use crate::bank::FilterBank;
use crate::binding::{FilterControl, TrackerFilterBinding};
use crate::id::TrackerId;
use crate::registry::TrackerRegistryWriter;

/// Create a tracker's binding and control handle and register both.
///
/// # Errors
///
/// Returns [`TrackerError::DuplicateTracker`] if either side already knows
/// `id`. Nothing is registered in that case.
pub fn register_tracker(
    bank: &mut FilterBank,
    registry: &dyn TrackerRegistryWriter,
    id: TrackerId,
    allow_filtering: bool,
    config: FilterConfig,
) -> Result<FilterControl, TrackerError> {
    if bank.contains(id) {
        return Err(TrackerError::DuplicateTracker { tracker: id.get() });
    }

    let (binding, control) = TrackerFilterBinding::new(id, allow_filtering, config);
    registry.register(control.clone())?;
    if let Err(error) = bank.insert(binding) {
        let _removed = registry.unregister(id);
        return Err(error);
    }

    info!(tracker = %id, allow_filtering, mode = %config.mode(), "Tracker filtering created");
    Ok(control)
}

/// Remove a tracker's binding and control handle.
///
/// # Errors
///
/// Returns [`TrackerError::UnknownTracker`] if neither side knows `id`.
pub fn unregister_tracker(
    bank: &mut FilterBank,
    registry: &dyn TrackerRegistryWriter,
    id: TrackerId,
) -> Result<(), TrackerError> {
    let from_bank = bank.remove(id).is_ok();
    let from_registry = registry.unregister(id).is_ok();
    if !from_bank && !from_registry {
        return Err(TrackerError::UnknownTracker { tracker: id.get() });
    }
    info!(tracker = %id, "Tracker filtering destroyed");
    Ok(())
}
