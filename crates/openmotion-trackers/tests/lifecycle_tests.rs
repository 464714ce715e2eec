//! Tracker lifecycle and global apply, end to end.

use openmotion_errors::TrackerError;
use openmotion_filters::math::angle_between;
use openmotion_trackers::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

const TICK_NS: u64 = 10_000_000;

fn yaw(angle: f32, timestamp_ns: u64) -> Result<RotationSample, Box<dyn std::error::Error>> {
    Ok(RotationSample::from_unit(
        Rotation::from_euler_angles(0.0, 0.0, angle),
        timestamp_ns,
    )?)
}

#[test]
fn global_apply_skips_trackers_with_filtering_disallowed() -> TestResult {
    let mut bank = FilterBank::new();
    let registry = InMemoryTrackerRegistry::new();
    let settings = FiltersSettings::default();

    let on = register_tracker(&mut bank, &registry, TrackerId::new(1), true, *settings.current())?;
    let off = register_tracker(&mut bank, &registry, TrackerId::new(2), false, *settings.current())?;

    settings.set(FilterConfig::disabled());
    assert_eq!(settings.update_trackers_filters(&registry), 1);
    assert!(on.has_pending_config());
    assert!(!off.has_pending_config());

    bank.update(TrackerId::new(1), &yaw(0.0, 0)?)?;
    bank.update(TrackerId::new(2), &yaw(0.0, 0)?)?;
    let on_engine = bank.get(TrackerId::new(1)).ok_or("tracker 1 missing")?.engine();
    let off_engine = bank.get(TrackerId::new(2)).ok_or("tracker 2 missing")?.engine();
    assert_eq!(on_engine.mode(), FilterMode::None);
    assert_eq!(off_engine.mode(), FilterMode::Prediction);
    Ok(())
}

#[test]
fn per_tracker_apply_validates_raw_values() -> TestResult {
    let mut bank = FilterBank::new();
    let registry = InMemoryTrackerRegistry::new();
    let settings = FiltersSettings::default();
    register_tracker(&mut bank, &registry, TrackerId::new(5), true, *settings.current())?;

    let applied = settings.apply_config(
        &registry,
        TrackerId::new(5),
        RawFilterConfig {
            mode: Some("Smoothing".into()),
            amount: Some(7.0),
            ..RawFilterConfig::default()
        },
    )?;
    assert_eq!(applied.mode(), FilterMode::Smoothing);
    assert!((applied.amount() - 1.0).abs() < f32::EPSILON);

    let unknown = settings.apply_config(&registry, TrackerId::new(6), RawFilterConfig::default());
    assert_eq!(unknown, Err(TrackerError::UnknownTracker { tracker: 6 }));
    Ok(())
}

#[test]
fn unregistered_tracker_stops_filtering() -> TestResult {
    let mut bank = FilterBank::new();
    let registry = InMemoryTrackerRegistry::new();
    let id = TrackerId::new(3);
    register_tracker(&mut bank, &registry, id, true, FilterConfig::default())?;

    for step in 0..3u64 {
        bank.update(id, &yaw(0.02 * step as f32, step * TICK_NS)?)?;
    }
    unregister_tracker(&mut bank, &registry, id)?;

    assert_eq!(
        bank.update(id, &yaw(0.1, 4 * TICK_NS)?),
        Err(TrackerError::UnknownTracker { tracker: 3 })
    );
    assert!(registry.filter_control(id).is_none());
    Ok(())
}

#[test]
fn reregistered_tracker_starts_cold() -> TestResult {
    let mut bank = FilterBank::new();
    let registry = InMemoryTrackerRegistry::new();
    let id = TrackerId::new(4);

    register_tracker(&mut bank, &registry, id, true, FilterConfig::default())?;
    for step in 0..5u64 {
        bank.update(id, &yaw(0.05 * step as f32, step * TICK_NS)?)?;
    }
    unregister_tracker(&mut bank, &registry, id)?;
    register_tracker(&mut bank, &registry, id, true, FilterConfig::default())?;

    let sample = yaw(1.0, 0)?;
    let out = bank.update(id, &sample)?;
    assert!(angle_between(&out, &sample.rotation()) < 1e-6);
    Ok(())
}

/// Registry kept as a plain list, with an optional cap on its size.
#[derive(Default)]
struct ListRegistry {
    controls: parking_lot::Mutex<Vec<FilterControl>>,
    limit: Option<usize>,
}

impl TrackerRegistry for ListRegistry {
    fn filter_controls(&self) -> Vec<FilterControl> {
        self.controls.lock().clone()
    }

    fn filter_control(&self, id: TrackerId) -> Option<FilterControl> {
        self.controls.lock().iter().find(|control| control.id() == id).cloned()
    }
}

impl TrackerRegistryWriter for ListRegistry {
    fn register(&self, control: FilterControl) -> Result<(), TrackerError> {
        let mut controls = self.controls.lock();
        let full = self.limit.is_some_and(|limit| controls.len() >= limit);
        if full || controls.iter().any(|existing| existing.id() == control.id()) {
            return Err(TrackerError::DuplicateTracker { tracker: control.id().get() });
        }
        controls.push(control);
        Ok(())
    }

    fn unregister(&self, id: TrackerId) -> Result<FilterControl, TrackerError> {
        let mut controls = self.controls.lock();
        let index = controls
            .iter()
            .position(|control| control.id() == id)
            .ok_or(TrackerError::UnknownTracker { tracker: id.get() })?;
        Ok(controls.remove(index))
    }
}

#[test]
fn lifecycle_works_with_any_registry() -> TestResult {
    let mut bank = FilterBank::new();
    let registry = ListRegistry::default();
    let settings = FiltersSettings::default();

    register_tracker(&mut bank, &registry, TrackerId::new(1), true, *settings.current())?;
    register_tracker(&mut bank, &registry, TrackerId::new(2), false, *settings.current())?;
    assert_eq!(registry.filter_controls().len(), 2);

    settings.set(FilterConfig::disabled());
    assert_eq!(settings.update_trackers_filters(&registry), 1);

    unregister_tracker(&mut bank, &registry, TrackerId::new(1))?;
    assert!(registry.filter_control(TrackerId::new(1)).is_none());
    assert!(!bank.contains(TrackerId::new(1)));
    Ok(())
}

#[test]
fn rejected_registration_leaves_bank_untouched() -> TestResult {
    let mut bank = FilterBank::new();
    let registry = ListRegistry {
        limit: Some(1),
        ..ListRegistry::default()
    };

    register_tracker(&mut bank, &registry, TrackerId::new(1), true, FilterConfig::default())?;
    assert_eq!(
        register_tracker(&mut bank, &registry, TrackerId::new(2), true, FilterConfig::default())
            .map(|control| control.id()),
        Err(TrackerError::DuplicateTracker { tracker: 2 })
    );
    assert!(!bank.contains(TrackerId::new(2)));
    assert_eq!(bank.len(), 1);
    Ok(())
}
