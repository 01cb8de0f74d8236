use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use logreg_exercise::features::{map_feature, num_terms};
use logreg_exercise::grader::Grader;
use logreg_exercise::logistic::cost_function;
use logreg_exercise::{Float, Vector};
use std::hint::black_box;

fn make_inputs(n: usize) -> (Vector, Vector) {
    let x1 = Vector::from_fn(n, |i, _| ((i * 7) % 53) as Float * 0.03 - 0.8);
    let x2 = Vector::from_fn(n, |i, _| ((i * 11) % 41) as Float * 0.04 - 0.7);
    (x1, x2)
}

fn bench_map_feature(c: &mut Criterion) {
    let (x1, x2) = make_inputs(128);

    let mut group = c.benchmark_group("map_feature");
    group.bench_function("degree6_128", |b| {
        b.iter(|| map_feature(black_box(&x1), black_box(&x2), 6).unwrap())
    });
    group.bench_function("degree2_128", |b| {
        b.iter(|| map_feature(black_box(&x1), black_box(&x2), 2).unwrap())
    });
    group.finish();
}

fn bench_cost_function(c: &mut Criterion) {
    let (x1, x2) = make_inputs(128);
    let x = map_feature(&x1, &x2, 6).unwrap();
    let y = Vector::from_fn(128, |i, _| (i % 2) as Float);
    let theta = Vector::from_fn(num_terms(6), |i, _| 0.01 * i as Float - 0.1);

    let mut group = c.benchmark_group("cost_function");
    group.bench_function("degree6_128", |b| {
        b.iter(|| cost_function(black_box(&theta), black_box(&x), black_box(&y)).unwrap())
    });
    group.finish();
}

fn bench_grader(c: &mut Criterion) {
    let mut group = c.benchmark_group("grader");
    group.bench_function("all_parts", |b| {
        b.iter_batched(
            Grader::with_reference_solutions,
            |grader| {
                for item in &grader {
                    black_box(item.unwrap());
                }
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_map_feature,
    bench_cost_function,
    bench_grader
);
criterion_main!(benches);
