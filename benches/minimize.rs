use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dfa_minimizer::{minimization::minimize_json, random::generate_random_description_with};

fn minimize_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimize");
    let mut rng = fastrand::Rng::with_seed(0xdfa);

    for size in [16, 128, 1024] {
        let description = generate_random_description_with(&mut rng, 4, size, 0.9);
        let dfa = description.validate().unwrap();
        group.bench_with_input(BenchmarkId::new("dfa", size), &dfa, |b, dfa| {
            b.iter(|| black_box(dfa.minimize()))
        });

        let input = description.to_json();
        group.bench_with_input(BenchmarkId::new("json", size), &input, |b, input| {
            b.iter(|| black_box(minimize_json(input).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, minimize_random);
criterion_main!(benches);
