use criterion::Criterion;

use voigtian::faddeeva::faddeeva;
use voigtian::likelihood::negative_log_likelihood;
use voigtian::prelude::*;
use voigtian::{evaluate, gridspace, DoubleSidedVoigtianShape, ObservableRange};

fn faddeeva_regions(c: &mut Criterion) {
    let points: Vec<num_complex::Complex64> = gridspace(-8.0, 8.0, 0.05)
        .into_iter()
        .map(|x| num_complex::Complex64::new(x, 0.3))
        .collect();
    c.bench_function("faddeeva_upper_half_plane", |b| {
        b.iter(|| points.iter().map(|z| faddeeva(*z).re).sum::<f64>())
    });
}

fn double_sided_voigtian(c: &mut Criterion) {
    let xs = gridspace(0.0, 25.0, 0.01);
    c.bench_function("double_sided_voigtian_evaluate", |b| {
        b.iter(|| {
            xs.iter()
                .map(|x| evaluate(*x, 7.0, 0.7, 1.4, 1.0, 2.0, 25.0))
                .sum::<f64>()
        })
    });

    let range = ObservableRange::new(0.0, 25.0).unwrap();
    let shape = DoubleSidedVoigtianShape::new(7.0, 0.7, 1.4, 1.0, 2.0, range.max);
    c.bench_function("double_sided_voigtian_normalize", |b| {
        b.iter(|| shape.normalized(range).unwrap().normalization())
    });

    let pdf = shape.normalized(range).unwrap();
    c.bench_function("double_sided_voigtian_nll", |b| {
        b.iter(|| negative_log_likelihood(&pdf, &xs).unwrap())
    });
}

fn density(c: &mut Criterion) {
    faddeeva_regions(c);
    double_sided_voigtian(c);
}

criterion::criterion_group!(benches, density);
criterion::criterion_main!(benches);
