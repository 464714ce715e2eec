//! Fuzzes filter config parsing and validation.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_filter_config
#![no_main]
use libfuzzer_sys::fuzz_target;
use openmotion_filters::{FilterConfig, RawFilterConfig};

fn check(config: &FilterConfig) {
    assert!((0.0..=1.0).contains(&config.amount()));
    assert!(config.smooth_min() > 0.0);
    assert!((1..=64).contains(&config.predict_buffer()));
    assert!(config.smoothing_factor().is_finite());
    assert!(config.prediction_factor().is_finite());
}

fuzz_target!(|data: &[u8]| {
    // Malformed JSON is an error; valid JSON always yields a runnable config.
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = serde_json::from_str::<FilterConfig>(text) {
            check(&config);
        }
    }

    // Arbitrary numbers straight into validation.
    let mut values = data.chunks_exact(8).map(|b| {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(b);
        f64::from_le_bytes(bytes)
    });
    let raw = RawFilterConfig {
        mode: None,
        amount: values.next(),
        smooth_min: values.next(),
        predict_min: values.next(),
        predict_multiplier: values.next(),
        predict_buffer: values.next(),
    };
    check(&FilterConfig::validate(raw));
});
