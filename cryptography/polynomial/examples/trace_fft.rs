use bls12_381::{reduce_bytes_to_scalar_bias, Scalar};
use crate_crypto_ntt_polynomial::{Decimation, Domain, Error, PolyCoeff};
use tracing_forest::{util::LevelFilter, ForestLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

const LOG_SIZE: usize = 16;

fn dummy_polynomial() -> PolyCoeff<Scalar> {
    (0..1u64 << LOG_SIZE)
        .map(|i| {
            let mut bytes = [0xA5u8; 32];
            bytes[24..].copy_from_slice(&i.to_be_bytes());
            reduce_bytes_to_scalar_bias(bytes)
        })
        .collect::<Vec<_>>()
        .into()
}

fn main() -> Result<(), Error> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    Registry::default()
        .with(env_filter)
        .with(ForestLayer::default())
        .init();

    let domain = Domain::<Scalar>::new(1 << LOG_SIZE)?;
    let polynomial = dummy_polynomial();

    let mut values = polynomial.0.clone();
    domain.fft(&mut values, Decimation::DIF, true)?;
    // DIF leaves the evaluations bit-reversed, which is what the DIT inverse expects
    domain.fft_inverse(&mut values, Decimation::DIT, true)?;
    assert_eq!(values, polynomial.0);

    let evaluations = domain.fft_scalars(polynomial.clone())?;
    let recovered = domain.ifft_scalars(evaluations)?;
    assert_eq!(recovered, polynomial);

    Ok(())
}
