use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use laser_fields::algebra::FieldExt;
use laser_fields::dispersion::{Chirp, DispersionOptions, ElementRef};
use laser_fields::fields::{gaussian_pulse, Field, FieldRef};

fn pulse() -> FieldRef {
    gaussian_pulse(0.057, 0.01, 250.0, 6.0, 0.0).expect("reference pulse")
}

fn bench_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    let field = pulse();
    let times: Vec<f64> = (0..10_000).map(|i| -500.0 + 0.1 * i as f64).collect();

    group.bench_function(BenchmarkId::new("field_amplitude", times.len()), |b| {
        b.iter(|| times.iter().map(|&t| field.field_amplitude(t).z).sum::<f64>())
    });
    group.bench_function(BenchmarkId::new("cycle_peak_intensity", 100), |b| {
        b.iter(|| times.iter().step_by(100).map(|&t| field.intensity(t)).sum::<f64>())
    });
    group.finish();
}

fn bench_dispersion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispersion");
    group.sample_size(10);
    let field = pulse();
    let options = DispersionOptions::default();
    for b_chirp in [1.0e3, 1.0e4, 1.0e5] {
        let chirp: ElementRef = Arc::new(Chirp::new(b_chirp, 0.057));
        group.bench_function(BenchmarkId::new("chirp", b_chirp), |b| {
            b.iter_batched(
                || chirp.clone(),
                |element| {
                    let _ = field.dispersed(element, &options);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluation, bench_dispersion);
criterion_main!(benches);
