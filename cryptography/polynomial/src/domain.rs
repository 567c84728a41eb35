use bls12_381::ff::{Field, PrimeField};

use crate::{
    errors::{DomainError, FFTError},
    fft::{dif_fft, dit_fft, log2_pow2, reverse_bit_order, Decimation, Plan},
    poly_coeff::PolyCoeff,
};

/// A multiplicative subgroup of size `2^k` together with every table needed to
/// run forward and inverse FFTs over it, and over one of its cosets.
///
/// A domain is built once per size and is immutable afterwards, so it can be
/// shared by reference between any number of concurrent transforms.
#[derive(Debug, Clone)]
pub struct Domain<F: PrimeField> {
    /// Number of points in the domain. Always a power of two.
    cardinality: usize,
    /// Inverse of the domain size as a field element, used to normalize
    /// inverse transforms.
    cardinality_inv: F,
    /// Generator of the domain
    // Element has order `cardinality`
    generator: F,
    generator_inv: F,
    /// Twiddle factors for each recursion depth of the forward FFT.
    ///
    /// `twiddles[s][i] = generator^(i * 2^s)` and `twiddles[s]` has
    /// `cardinality / 2^(s+1)` entries.
    twiddles: Vec<Vec<F>>,
    /// Same layout as `twiddles`, built from `generator_inv`.
    twiddles_inv: Vec<Vec<F>>,
    /// Element by which the domain is shifted to obtain its coset.
    coset_shift: F,
    coset_shift_inv: F,
    /// `coset_shift^i`
    coset_table: Vec<F>,
    coset_table_reversed: Vec<F>,
    /// `coset_shift^(-i)`
    coset_table_inv: Vec<F>,
    coset_table_inv_reversed: Vec<F>,
    /// `cardinality_inv * coset_shift^(-i)`, so that a coset inverse transform
    /// is normalized with one multiplication per element.
    coset_table_inv_normalized: Vec<F>,
    coset_table_inv_reversed_normalized: Vec<F>,
}

impl<F: PrimeField> Domain<F> {
    /// Creates a domain with `cardinality` points, whose coset is shifted by
    /// the field's multiplicative generator.
    pub fn new(cardinality: usize) -> Result<Self, DomainError> {
        Self::with_coset_shift(cardinality, F::MULTIPLICATIVE_GENERATOR)
    }

    /// Creates a domain with `cardinality` points, whose coset is
    /// `coset_shift * <generator>`.
    ///
    /// `coset_shift` must be non-zero and must not itself be a
    /// `cardinality`-th root of unity.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(cardinality = cardinality)))]
    pub fn with_coset_shift(cardinality: usize, coset_shift: F) -> Result<Self, DomainError> {
        let generator = Self::compute_generator_for_size(cardinality)?;
        let generator_inv = generator
            .invert()
            .expect("roots of unity are never zero");

        let cardinality_inv = F::from(cardinality as u64)
            .invert()
            .expect("cardinality is smaller than the field modulus");

        if coset_shift.pow_vartime([cardinality as u64]) == F::ONE {
            return Err(DomainError::InvalidCosetShift);
        }
        let coset_shift_inv =
            Option::<F>::from(coset_shift.invert()).ok_or(DomainError::InvalidCosetShift)?;

        let log_cardinality = log2_pow2(cardinality);
        let twiddles = precompute_twiddles(generator, log_cardinality);
        let twiddles_inv = precompute_twiddles(generator_inv, log_cardinality);

        let coset_table = powers_of(coset_shift, cardinality);
        let mut coset_table_reversed = coset_table.clone();
        reverse_bit_order(&mut coset_table_reversed);

        let coset_table_inv = powers_of(coset_shift_inv, cardinality);
        let mut coset_table_inv_reversed = coset_table_inv.clone();
        reverse_bit_order(&mut coset_table_inv_reversed);

        let mut coset_table_inv_normalized = coset_table_inv.clone();
        mul_by_scalar(&mut coset_table_inv_normalized, cardinality_inv);
        let mut coset_table_inv_reversed_normalized = coset_table_inv_normalized.clone();
        reverse_bit_order(&mut coset_table_inv_reversed_normalized);

        Ok(Self {
            cardinality,
            cardinality_inv,
            generator,
            generator_inv,
            twiddles,
            twiddles_inv,
            coset_shift,
            coset_shift_inv,
            coset_table,
            coset_table_reversed,
            coset_table_inv,
            coset_table_inv_reversed,
            coset_table_inv_normalized,
            coset_table_inv_reversed_normalized,
        })
    }

    /// Computes a primitive `size`-th root of unity by repeatedly squaring the
    /// field's primitive `2^S`-th root of unity.
    fn compute_generator_for_size(size: usize) -> Result<F, DomainError> {
        if !size.is_power_of_two() {
            return Err(DomainError::SizeNotPowerOfTwo { size });
        }

        let log_size_of_group = log2_pow2(size);
        if log_size_of_group > F::S {
            return Err(DomainError::SizeExceedsTwoAdicity {
                size,
                two_adicity: F::S,
            });
        }

        let mut generator = F::ROOT_OF_UNITY;
        for _ in log_size_of_group..F::S {
            generator = generator.square();
        }
        Ok(generator)
    }

    /// The size of the domain
    ///
    /// Note: This is always a power of two
    pub const fn cardinality(&self) -> usize {
        self.cardinality
    }

    pub const fn cardinality_inv(&self) -> &F {
        &self.cardinality_inv
    }

    pub const fn generator(&self) -> &F {
        &self.generator
    }

    pub const fn generator_inv(&self) -> &F {
        &self.generator_inv
    }

    pub const fn coset_shift(&self) -> &F {
        &self.coset_shift
    }

    pub const fn coset_shift_inv(&self) -> &F {
        &self.coset_shift_inv
    }

    pub fn twiddles(&self) -> &[Vec<F>] {
        &self.twiddles
    }

    pub fn twiddles_inv(&self) -> &[Vec<F>] {
        &self.twiddles_inv
    }

    pub fn coset_table(&self) -> &[F] {
        &self.coset_table
    }

    pub fn coset_table_reversed(&self) -> &[F] {
        &self.coset_table_reversed
    }

    pub fn coset_table_inv(&self) -> &[F] {
        &self.coset_table_inv
    }

    pub fn coset_table_inv_reversed(&self) -> &[F] {
        &self.coset_table_inv_reversed
    }

    /// Returns the points of the domain, `generator^i`, in natural order.
    pub fn roots(&self) -> Vec<F> {
        powers_of(self.generator, self.cardinality)
    }

    /// Computes the FFT of `values` in place.
    ///
    /// - With [`Decimation::DIT`] the input must be in bit-reversed order, and the output is in natural order.
    /// - With [`Decimation::DIF`] the input must be in natural order, and the output is in bit-reversed order.
    ///
    /// If `coset` is set, the polynomial is evaluated on `coset_shift * <generator>` instead of the domain.
    ///
    /// Returns an error, without touching `values`, if `values` does not have
    /// exactly `cardinality` elements.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(size = values.len())))]
    pub fn fft(&self, values: &mut [F], decimation: Decimation, coset: bool) -> Result<(), FFTError> {
        self.fft_with_plan(values, decimation, coset, Plan::from_available_parallelism())
    }

    /// Computes the inverse FFT of `values` in place.
    ///
    /// The ordering conventions are the same as for [`Domain::fft`], so a forward
    /// DIF transform is undone by an inverse DIT transform and vice versa. If `coset`
    /// is set, `values` are taken to be evaluations over the coset and the output
    /// is the coefficients of the polynomial that was evaluated there.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(size = values.len())))]
    pub fn fft_inverse(
        &self,
        values: &mut [F],
        decimation: Decimation,
        coset: bool,
    ) -> Result<(), FFTError> {
        self.fft_inverse_with_plan(values, decimation, coset, Plan::from_available_parallelism())
    }

    pub(crate) fn fft_with_plan(
        &self,
        values: &mut [F],
        decimation: Decimation,
        coset: bool,
        plan: Plan,
    ) -> Result<(), FFTError> {
        self.check_num_values(values.len())?;

        if coset {
            #[cfg(feature = "tracing")]
            let _span = tracing::info_span!("scale by coset table").entered();

            let coset_table = match decimation {
                Decimation::DIT => &self.coset_table_reversed,
                Decimation::DIF => &self.coset_table,
            };
            mul_by_table(values, coset_table);
        }

        match decimation {
            Decimation::DIF => dif_fft(values, &self.twiddles, 0, plan),
            Decimation::DIT => dit_fft(values, &self.twiddles, 0, plan),
        }
        Ok(())
    }

    pub(crate) fn fft_inverse_with_plan(
        &self,
        values: &mut [F],
        decimation: Decimation,
        coset: bool,
        plan: Plan,
    ) -> Result<(), FFTError> {
        self.check_num_values(values.len())?;

        match decimation {
            Decimation::DIF => dif_fft(values, &self.twiddles_inv, 0, plan),
            Decimation::DIT => dit_fft(values, &self.twiddles_inv, 0, plan),
        }

        if !coset {
            mul_by_scalar(values, self.cardinality_inv);
            return Ok(());
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("scale by inverse coset table").entered();

        // The inverse transform leaves its output in the opposite order to its input
        let coset_table_inv = match decimation {
            Decimation::DIT => &self.coset_table_inv_normalized,
            Decimation::DIF => &self.coset_table_inv_reversed_normalized,
        };
        mul_by_table(values, coset_table_inv);
        Ok(())
    }

    /// Evaluates a polynomial at the points in the domain.
    ///
    /// The evaluations are returned in natural order, ie the i'th value is the
    /// evaluation at `generator^i`.
    pub fn fft_scalars(&self, polynomial: PolyCoeff<F>) -> Result<Vec<F>, FFTError> {
        self.evaluate(polynomial, false)
    }

    /// Evaluates a polynomial at the points in the domain multiplied by the coset shift.
    pub fn coset_fft_scalars(&self, polynomial: PolyCoeff<F>) -> Result<Vec<F>, FFTError> {
        self.evaluate(polynomial, true)
    }

    /// Interpolates evaluations over the domain, given in natural order, to get
    /// a polynomial in monomial form.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn ifft_scalars(&self, evaluations: Vec<F>) -> Result<PolyCoeff<F>, FFTError> {
        self.interpolate(evaluations, false)
    }

    /// Interpolates evaluations over the coset of the domain, given in natural order.
    pub fn coset_ifft_scalars(&self, evaluations: Vec<F>) -> Result<PolyCoeff<F>, FFTError> {
        self.interpolate(evaluations, true)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    fn evaluate(&self, mut polynomial: PolyCoeff<F>, coset: bool) -> Result<Vec<F>, FFTError> {
        if polynomial.len() > self.cardinality {
            return Err(FFTError::PolynomialTooLarge {
                num_coefficients: polynomial.len(),
                domain_size: self.cardinality,
            });
        }

        // Pad the polynomial with zeroes, so that it is the same size as the
        // domain.
        polynomial.resize(self.cardinality, F::ZERO);

        self.fft(&mut polynomial, Decimation::DIF, coset)?;
        reverse_bit_order(&mut polynomial);

        Ok(polynomial.0)
    }

    fn interpolate(&self, mut evaluations: Vec<F>, coset: bool) -> Result<PolyCoeff<F>, FFTError> {
        self.check_num_values(evaluations.len())?;

        reverse_bit_order(&mut evaluations);
        self.fft_inverse(&mut evaluations, Decimation::DIT, coset)?;

        Ok(evaluations.into())
    }

    const fn check_num_values(&self, num_values: usize) -> Result<(), FFTError> {
        if num_values != self.cardinality {
            return Err(FFTError::LengthMismatch {
                num_values,
                domain_size: self.cardinality,
            });
        }
        Ok(())
    }
}

/// Returns `[1, base, base^2, ..., base^(len-1)]`.
///
/// Each worker jumps to the start of its chunk with an exponentiation, then
/// walks the chunk with one multiplication per element.
fn powers_of<F: Field>(base: F, len: usize) -> Vec<F> {
    let mut powers = vec![F::ONE; len];
    maybe_rayon::execute(
        &mut powers,
        maybe_rayon::current_num_threads(),
        |start, chunk| {
            let mut power = base.pow_vartime([start as u64]);
            for value in chunk {
                *value = power;
                power *= base;
            }
        },
    );
    powers
}

/// Returns the twiddle factors for every stage of a transform of size `2^log_n`.
///
/// Stage 0 holds `root^0, ..., root^(n/2 - 1)`; stage `s` keeps every `2^s`-th
/// element of stage 0.
fn precompute_twiddles<F: Field>(root: F, log_n: u32) -> Vec<Vec<F>> {
    if log_n == 0 {
        return Vec::new();
    }

    let first_stage = powers_of(root, 1 << (log_n - 1));
    let mut twiddles = Vec::with_capacity(log_n as usize);
    for stage in 1..log_n {
        twiddles.push(first_stage.iter().step_by(1 << stage).copied().collect());
    }
    twiddles.insert(0, first_stage);
    twiddles
}

/// Computes `values[i] *= table[i]`.
fn mul_by_table<F: Field>(values: &mut [F], table: &[F]) {
    maybe_rayon::execute(
        values,
        maybe_rayon::current_num_threads(),
        |start, chunk| {
            for (value, factor) in chunk.iter_mut().zip(&table[start..]) {
                *value *= factor;
            }
        },
    );
}

fn mul_by_scalar<F: Field>(values: &mut [F], scalar: F) {
    maybe_rayon::execute(
        values,
        maybe_rayon::current_num_threads(),
        |_, chunk| {
            for value in chunk {
                *value *= scalar;
            }
        },
    );
}
