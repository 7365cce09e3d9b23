use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix_power::init::seeded_normal;
use matrix_power::power::Strategy;

fn criterion_benchmark(c: &mut Criterion) {
    let size = black_box(64);
    let a = seeded_normal(size, 1234).expect("Creating matrix failed");

    let mut group = c.benchmark_group(format!("matrix_power {size}x{size}"));
    for p in [2i64, 8, 32, 128] {
        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.name(), p), &p, |b, &p| {
                b.iter(|| strategy.apply(a.clone(), p))
            });
        }
    }
    group.finish();

    let large = seeded_normal(256, 1234).expect("Creating matrix failed");
    c.bench_function("matrix_power_smart 256x256 p=100", |b| {
        b.iter(|| Strategy::Squaring.apply(large.clone(), black_box(100)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
