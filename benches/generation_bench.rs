//! Generation throughput benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use annosim::generator::seeded_rng;
use annosim::{GeneratorConfig, IntervalTrackGenerator};

fn benchmark_generation(c: &mut Criterion) {
    let generator = IntervalTrackGenerator::new(GeneratorConfig::default()).expect("valid config");

    c.bench_function("reference_2x1Mb", |b| {
        b.iter(|| {
            let reference = generator.generate_reference(&mut seeded_rng(1));
            black_box(reference.annotations.len());
        });
    });

    c.bench_function("pair_2x1Mb_factor_1.5", |b| {
        b.iter(|| {
            let pair = generator
                .generate_pair(black_box(1.5), &mut seeded_rng(1))
                .expect("valid factor");
            black_box(pair.query.len());
        });
    });
}

criterion_group!(benches, benchmark_generation);
criterion_main!(benches);
