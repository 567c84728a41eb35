use bls12_381::{ff::Field, Scalar};
use crate_crypto_ntt_polynomial::{Decimation, Domain, PolyCoeff};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const LOG_SIZES: [u32; 3] = [10, 13, 16];

pub fn bench_domain_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain_new");
    for log_n in LOG_SIZES {
        group.bench_with_input(BenchmarkId::from_parameter(1 << log_n), &log_n, |b, &log_n| {
            b.iter(|| Domain::<Scalar>::new(1 << log_n).expect("valid size"));
        });
    }
    group.finish();
}

pub fn bench_fft(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft");
    for log_n in LOG_SIZES {
        let size = 1 << log_n;
        let domain = Domain::<Scalar>::new(size).expect("valid size");
        let values = random_scalars(size);

        for (name, decimation, coset) in [
            ("dif", Decimation::DIF, false),
            ("dit", Decimation::DIT, false),
            ("dif_coset", Decimation::DIF, true),
        ] {
            group.bench_with_input(BenchmarkId::new(name, size), &values, |b, values| {
                b.iter_batched_ref(
                    || values.clone(),
                    |values| domain.fft(values, decimation, coset),
                    criterion::BatchSize::LargeInput,
                );
            });
        }

        group.bench_with_input(BenchmarkId::new("inverse_dit", size), &values, |b, values| {
            b.iter_batched_ref(
                || values.clone(),
                |values| domain.fft_inverse(values, Decimation::DIT, false),
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

pub fn bench_polynomial_evaluation(c: &mut Criterion) {
    const NUM_ELEMENTS: usize = 8192;
    let polynomial = PolyCoeff(random_scalars(NUM_ELEMENTS));
    let value = Scalar::random(&mut rand::thread_rng());

    c.bench_function("poly_eval", |b| {
        b.iter(|| polynomial.eval(&value));
    });

    let domain = Domain::<Scalar>::new(NUM_ELEMENTS).expect("valid size");
    c.bench_function(&format!("fft_scalars of size {NUM_ELEMENTS}"), |b| {
        b.iter(|| domain.fft_scalars(polynomial.clone()));
    });
}

fn random_scalars(size: usize) -> Vec<Scalar> {
    let mut scalars = Vec::with_capacity(size);
    for _ in 0..size {
        scalars.push(Scalar::random(&mut rand::thread_rng()));
    }
    scalars
}

criterion_group!(
    benches,
    bench_domain_new,
    bench_fft,
    bench_polynomial_evaluation
);
criterion_main!(benches);
