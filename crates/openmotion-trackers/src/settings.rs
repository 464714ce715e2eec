//! Shared filter settings and global apply.

use std::sync::Arc;

use openmotion_errors::TrackerError;
use openmotion_filters::{ConfigAdjustment, FilterConfig, RawFilterConfig};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::id::TrackerId;
use crate::registry::TrackerRegistry;

/// Shared default filter configuration.
///
/// Readers get an `Arc` snapshot; writers replace it wholesale, so no reader
/// ever observes a half-updated configuration.
#[derive(Debug)]
pub struct FiltersSettings {
    current: RwLock<Arc<FilterConfig>>,
}

impl Default for FiltersSettings {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl FiltersSettings {
    /// Create settings holding `config`.
    pub fn new(config: FilterConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// Current shared configuration.
    pub fn current(&self) -> Arc<FilterConfig> {
        Arc::clone(&self.current.read())
    }

    /// Replace the shared configuration. Trackers pick it up on the next
    /// [`FiltersSettings::update_trackers_filters`].
    pub fn set(&self, config: FilterConfig) {
        *self.current.write() = Arc::new(config);
        debug!(mode = %config.mode(), amount = config.amount(), "Shared filter config replaced");
    }

    /// Validate `raw`, store it as the shared configuration, and report what
    /// validation changed.
    pub fn set_raw(&self, raw: RawFilterConfig) -> Vec<ConfigAdjustment> {
        let (config, adjustments) = FilterConfig::validate_with_report(raw);
        for adjustment in &adjustments {
            warn!(%adjustment, "Filter config value normalized");
        }
        self.set(config);
        adjustments
    }

    /// Push the shared configuration to every tracker whose filtering is
    /// allowed. Returns how many trackers received it.
    pub fn update_trackers_filters(&self, registry: &dyn TrackerRegistry) -> usize {
        let config = *self.current();
        let mut applied = 0usize;
        for control in registry.filter_controls() {
            if control.allow_filtering() {
                control.apply_config(config);
                applied += 1;
            }
        }
        info!(applied, mode = %config.mode(), "Applied shared filter config to trackers");
        applied
    }

    /// Validate `raw` and apply it to one tracker only.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UnknownTracker`] if `id` is not registered.
    pub fn apply_config(
        &self,
        registry: &dyn TrackerRegistry,
        id: TrackerId,
        raw: RawFilterConfig,
    ) -> Result<FilterConfig, TrackerError> {
        let control = registry
            .filter_control(id)
            .ok_or(TrackerError::UnknownTracker { tracker: id.get() })?;
        let config = FilterConfig::validate(raw);
        control.apply_config(config);
        debug!(tracker = %id, mode = %config.mode(), "Tracker filter config queued");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openmotion_filters::FilterMode;

    #[test]
    fn test_default_settings_use_prediction() {
        let settings = FiltersSettings::default();
        assert_eq!(settings.current().mode(), FilterMode::Prediction);
    }

    #[test]
    fn test_set_replaces_snapshot() {
        let settings = FiltersSettings::default();
        let before = settings.current();
        settings.set(FilterConfig::disabled());
        assert_eq!(before.mode(), FilterMode::Prediction);
        assert_eq!(settings.current().mode(), FilterMode::None);
    }

    #[test]
    fn test_set_raw_reports_adjustments() {
        let settings = FiltersSettings::default();
        let adjustments = settings.set_raw(RawFilterConfig {
            mode: Some("smoothing".into()),
            amount: Some(-5.0),
            ..RawFilterConfig::default()
        });
        assert_eq!(adjustments.len(), 1);
        assert!(settings.current().amount().abs() < f32::EPSILON);
    }
}
