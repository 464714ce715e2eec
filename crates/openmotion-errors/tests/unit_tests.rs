//! Unit tests for all error variants.
//!
//! Tests Display implementations, std::error::Error implementations,
//! and From conversions.

use openmotion_errors::{
    ConfigError, ErrorCategory, ErrorSeverity, OpenMotionError, Result, SampleError, TrackerError,
};

#[test]
fn test_all_sample_variants_display() -> Result<()> {
    let variants = [
        SampleError::NonFinite { component: 0 },
        SampleError::Degenerate { norm: 1e-12 },
    ];
    for variant in variants {
        assert!(!variant.to_string().is_empty());
        let _: &dyn std::error::Error = &variant;
    }
    Ok(())
}

#[test]
fn test_from_conversions_preserve_category() -> Result<()> {
    let cases: Vec<(OpenMotionError, ErrorCategory)> = vec![
        (SampleError::NonFinite { component: 1 }.into(), ErrorCategory::Sample),
        (ConfigError::parse("bad").into(), ErrorCategory::Config),
        (TrackerError::DuplicateTracker { tracker: 2 }.into(), ErrorCategory::Tracker),
        (std::io::Error::other("disk").into(), ErrorCategory::IO),
        (OpenMotionError::other("misc"), ErrorCategory::Other),
    ];
    for (err, category) in cases {
        assert_eq!(err.category(), category, "wrong category for {err}");
    }
    Ok(())
}

#[test]
fn test_nothing_in_the_tree_is_critical() -> Result<()> {
    let errors: Vec<OpenMotionError> = vec![
        SampleError::Degenerate { norm: 0.0 }.into(),
        ConfigError::io("a.json", "missing").into(),
        TrackerError::UnknownTracker { tracker: 0 }.into(),
    ];
    for err in errors {
        assert!(err.is_recoverable());
        assert!(err.severity() <= ErrorSeverity::Error);
    }
    Ok(())
}

#[test]
fn test_top_level_display_prefixes_source() -> Result<()> {
    let err: OpenMotionError = TrackerError::UnknownTracker { tracker: 12 }.into();
    assert_eq!(err.to_string(), "Tracker error: tracker 12 is not registered");
    Ok(())
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tracker_error_round_trips_id(id in any::<u32>()) {
            prop_assert_eq!(TrackerError::UnknownTracker { tracker: id }.tracker(), id);
            prop_assert_eq!(TrackerError::DuplicateTracker { tracker: id }.tracker(), id);
        }

        #[test]
        fn non_finite_message_names_component(component in 0u8..4) {
            let msg = SampleError::NonFinite { component }.to_string();
            let expected = format!("component {component}");
            prop_assert!(msg.contains(&expected));
        }
    }
}
