//! Fuzzes sample ingress and every filter mode with arbitrary sample streams.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_rotation_stream
#![no_main]
use libfuzzer_sys::fuzz_target;
use openmotion_filters::math::is_unit;
use openmotion_filters::{FilterConfig, FilterEngine, FilterMode};
use openmotion_trackers::{TrackerFilterBinding, TrackerId};

const RECORD_LEN: usize = 24;

fuzz_target!(|data: &[u8]| {
    // First byte picks the tunables, the rest is a stream of
    // (w, x, y, z: f32, timestamp: u64) records.
    let Some((&knob, records)) = data.split_first() else {
        return;
    };
    let amount = f32::from(knob) / 255.0;
    let buffer = usize::from(knob % 64);

    let mut engines = [FilterMode::None, FilterMode::Smoothing, FilterMode::Prediction].map(|mode| {
        FilterEngine::new(
            FilterConfig::default()
                .with_mode(mode)
                .with_amount(amount)
                .with_predict_buffer(buffer),
        )
    });
    let (mut binding, control) =
        TrackerFilterBinding::new(TrackerId::new(0), true, FilterConfig::default());

    for record in records.chunks_exact(RECORD_LEN) {
        let mut words = record.chunks_exact(4).map(|b| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(b);
            bytes
        });
        let mut component = || words.next().map_or(0.0, f32::from_le_bytes);
        let wxyz = [component(), component(), component(), component()];
        let mut ts = [0u8; 8];
        if let Some(tail) = record.get(16..RECORD_LEN) {
            ts.copy_from_slice(tail);
        }
        let timestamp_ns = u64::from_le_bytes(ts);

        // Rejection is fine; panics and non-unit output are not.
        if let Ok(rotation) = binding.update_raw(wxyz, timestamp_ns) {
            assert!(is_unit(&rotation, 1e-5));
        }
        if let Ok(sample) = openmotion_filters::RotationSample::new(wxyz, timestamp_ns) {
            for engine in &mut engines {
                let out = engine.step(&sample);
                assert!(is_unit(&out, 1e-5));
            }
        }

        if knob & 1 == 1 {
            control.apply_config(FilterConfig::default().with_amount(amount));
        }
    }
});
