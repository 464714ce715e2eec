//! Filter Benchmarks
//!
//! Criterion benchmarks for one engine step per mode, with a warm history.

use criterion::{Criterion, criterion_group, criterion_main};
use openmotion_filters::prelude::*;

const TICK_NS: u64 = 4_000_000;

/// Engine pre-filled with a slow yaw so prediction history is full.
fn warm_engine(config: FilterConfig) -> (FilterEngine, u64) {
    let mut engine = FilterEngine::new(config);
    let mut timestamp = 0u64;
    for step in 0..64u32 {
        let rotation = Rotation::from_euler_angles(0.0, 0.0, 0.001 * step as f32);
        if let Ok(sample) = RotationSample::from_unit(rotation, timestamp) {
            engine.step(&sample);
        }
        timestamp += TICK_NS;
    }
    (engine, timestamp)
}

fn bench_mode(c: &mut Criterion, name: &str, config: FilterConfig) {
    let (mut engine, mut timestamp) = warm_engine(config);
    let rotation = Rotation::from_euler_angles(0.01, -0.02, 0.3);

    c.bench_function(name, |b| {
        b.iter(|| {
            timestamp += TICK_NS;
            if let Ok(sample) = RotationSample::from_unit(rotation, timestamp) {
                std::hint::black_box(engine.step(std::hint::black_box(&sample)));
            }
        })
    });
}

fn bench_none(c: &mut Criterion) {
    bench_mode(c, "engine_step_none", FilterConfig::disabled());
}

fn bench_smoothing(c: &mut Criterion) {
    bench_mode(
        c,
        "engine_step_smoothing",
        FilterConfig::default().with_mode(FilterMode::Smoothing),
    );
}

fn bench_prediction_default(c: &mut Criterion) {
    bench_mode(c, "engine_step_prediction_buffer_6", FilterConfig::default());
}

fn bench_prediction_max_buffer(c: &mut Criterion) {
    bench_mode(
        c,
        "engine_step_prediction_buffer_64",
        FilterConfig::default().with_predict_buffer(64),
    );
}

fn bench_sample_ingress(c: &mut Criterion) {
    c.bench_function("rotation_sample_new", |b| {
        b.iter(|| RotationSample::new(std::hint::black_box([0.9, 0.1, -0.3, 0.2]), 17))
    });
}

fn bench_validate(c: &mut Criterion) {
    let raw = RawFilterConfig {
        mode: Some("prediction".to_owned()),
        amount: Some(3.0),
        predict_buffer: Some(1000.0),
        ..RawFilterConfig::default()
    };
    c.bench_function("filter_config_validate", |b| {
        b.iter(|| FilterConfig::validate(std::hint::black_box(raw.clone())))
    });
}

criterion_group!(
    benches,
    bench_none,
    bench_smoothing,
    bench_prediction_default,
    bench_prediction_max_buffer,
    bench_sample_ingress,
    bench_validate
);
criterion_main!(benches);
