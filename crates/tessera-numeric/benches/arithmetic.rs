//! Criterion benchmarks for big-integer arithmetic.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tessera_numeric::{BigInteger, Rational};

fn operand(digits: usize, seed: u8) -> BigInteger {
    let text: String = (0..digits)
        .map(|i| char::from(b'1' + ((i as u8).wrapping_mul(7).wrapping_add(seed)) % 9))
        .collect();
    text.parse().unwrap()
}

fn bench_integer(c: &mut Criterion) {
    let sizes: Vec<usize> = vec![18, 180, 1_800];

    let mut group = c.benchmark_group("BigInteger::mul");
    for &n in &sizes {
        let (a, b) = (operand(n, 1), operand(n, 4));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(&a) * black_box(&b));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("BigInteger::div");
    for &n in &sizes {
        let (a, b) = (operand(2 * n, 2), operand(n, 5));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |bench, _| {
            bench.iter(|| black_box(&a) / black_box(&b));
        });
    }
    group.finish();
}

fn bench_rational(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rational");
    group.bench_function("harmonic_50", |bench| {
        bench.iter(|| {
            let mut sum = Rational::zero();
            for k in 1..=50i64 {
                sum += &Rational::new(BigInteger::one(), BigInteger::from(k));
            }
            sum
        });
    });
    group.bench_function("as_decimal_100", |bench| {
        let r = Rational::new(BigInteger::from(22), BigInteger::from(7));
        bench.iter(|| black_box(&r).as_decimal(100));
    });
    group.finish();
}

criterion_group!(benches, bench_integer, bench_rational);
criterion_main!(benches);
