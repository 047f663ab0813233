use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use matrixx::{MatrixXd, SvdMode, VectorXd};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_matrix(rows: usize, cols: usize) -> MatrixXd {
    MatrixXd::from_fn(rows, cols, |i, j| {
        ((i + 1) * (j + 2)) as f64 * 0.01 + if i == j { 10.0 } else { 0.0 }
    })
}

fn test_vector(n: usize) -> VectorXd {
    (0..n).map(|i| i as f64 + 1.0).collect()
}

// ---------------------------------------------------------------------------
// Matrix-vector product
// ---------------------------------------------------------------------------

fn dot_v(c: &mut Criterion) {
    let mut g = c.benchmark_group("dot_v");
    for &n in &[8usize, 64, 256] {
        let a = test_matrix(n, n);
        let x = test_vector(n);
        g.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| std::hint::black_box(&a).dot_v(std::hint::black_box(&x)).unwrap())
        });
    }
    g.finish();
}

// ---------------------------------------------------------------------------
// SVD
// ---------------------------------------------------------------------------

fn svd_factor(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd_factor");
    for &n in &[4usize, 16, 64] {
        let a = test_matrix(n, n);
        g.bench_with_input(BenchmarkId::new("thin", n), &n, |b, _| {
            b.iter(|| {
                std::hint::black_box(&a)
                    .svd(SvdMode::COMPUTE_THIN_U | SvdMode::COMPUTE_THIN_V)
                    .unwrap()
            })
        });
        g.bench_with_input(BenchmarkId::new("full", n), &n, |b, _| {
            b.iter(|| {
                std::hint::black_box(&a)
                    .svd(SvdMode::COMPUTE_FULL_U | SvdMode::COMPUTE_FULL_V)
                    .unwrap()
            })
        });
        g.bench_with_input(BenchmarkId::new("values_only", n), &n, |b, _| {
            b.iter(|| std::hint::black_box(&a).singular_values_only().unwrap())
        });
    }
    g.finish();
}

fn svd_solve(c: &mut Criterion) {
    let mut g = c.benchmark_group("svd_solve");
    for &(m, n) in &[(16usize, 16usize), (64, 16), (64, 64)] {
        let a = test_matrix(m, n);
        let rhs = test_vector(m);
        let svd = a.svd(SvdMode::default()).unwrap();
        g.bench_with_input(BenchmarkId::from_parameter(format!("{}x{}", m, n)), &m, |b, _| {
            b.iter(|| svd.solve(std::hint::black_box(&rhs)).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, dot_v, svd_factor, svd_solve);
criterion_main!(benches);
