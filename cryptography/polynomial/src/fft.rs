use bls12_381::ff::Field;
use maybe_rayon::prelude::*;

/// Selects the flavour of the Cooley-Tukey recursion used by a transform.
///
/// Both variants compute the same transform; they only differ in which side
/// of the transform is in bit-reversed order. Callers pick whichever saves
/// them a permutation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decimation {
    /// Decimation in time: the input must be in bit-reversed order and the
    /// output is in natural order.
    DIT,
    /// Decimation in frequency: the input must be in natural order and the
    /// output is in bit-reversed order.
    DIF,
}

/// A stage with at most this many butterflies is never split between workers,
/// even when the recursion itself is still running in parallel.
const BUTTERFLY_THRESHOLD: usize = 16;

/// Execution parameters for a single transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Plan {
    /// Recursion depth below which both halves are processed concurrently.
    /// `None` disables concurrency altogether.
    max_splits: Option<usize>,
    /// Number of workers available at the top of the recursion.
    num_threads: usize,
    /// Whether segments of 8 elements are handed to the radix-8 kernels.
    radix_8: bool,
}

impl Plan {
    /// Builds a plan that fans out until there are roughly as many concurrent
    /// tasks as there are threads.
    pub(crate) fn new(num_threads: usize) -> Self {
        let max_splits = (num_threads > 1)
            .then(|| num_threads.next_power_of_two().trailing_zeros() as usize);
        Self {
            max_splits,
            num_threads: num_threads.max(1),
            radix_8: true,
        }
    }

    pub(crate) fn from_available_parallelism() -> Self {
        Self::new(maybe_rayon::current_num_threads())
    }

    #[cfg(test)]
    pub(crate) const fn without_radix_8(mut self) -> Self {
        self.radix_8 = false;
        self
    }

    fn splits_at(&self, stage: usize) -> bool {
        matches!(self.max_splits, Some(max_splits) if stage < max_splits)
    }

    /// Estimated number of workers left for a single task at `stage`, since
    /// `2^stage` tasks are already running at that depth.
    fn workers_at(&self, stage: usize) -> usize {
        self.num_threads
            .checked_shr(stage as u32)
            .unwrap_or(0)
            .max(1)
    }
}

/// Replaces `(a, b)` with `(a + b, a - b)`.
#[inline(always)]
pub fn butterfly<F: Field>(a: &mut F, b: &mut F) {
    let t = *a;
    *a += *b;
    *b = t - *b;
}

/// Applies a butterfly to `a[i]` and `a[j]`, where `i < j`.
#[inline(always)]
fn butterfly_at<F: Field>(a: &mut [F], i: usize, j: usize) {
    let (lo, hi) = a.split_at_mut(j);
    butterfly(&mut lo[i], &mut hi[0]);
}

/// Decimation-in-frequency FFT of `values`, starting at recursion depth `stage`.
///
/// `twiddles[stage]` must hold at least `values.len() / 2` entries.
pub(crate) fn dif_fft<F: Field>(values: &mut [F], twiddles: &[Vec<F>], stage: usize, plan: Plan) {
    let n = values.len();
    if n == 1 {
        return;
    } else if n == 8 && plan.radix_8 {
        dif_kernel_8(values, twiddles, stage);
        return;
    }
    let m = n >> 1;
    let (lo, hi) = values.split_at_mut(m);
    let stage_twiddles = &twiddles[stage][..m];

    if m > BUTTERFLY_THRESHOLD && plan.splits_at(stage) {
        let chunk_size = maybe_rayon::chunk_size(m, plan.workers_at(stage));
        lo.maybe_par_chunks_mut(chunk_size)
            .zip(hi.maybe_par_chunks_mut(chunk_size))
            .zip(stage_twiddles.maybe_par_chunks(chunk_size))
            .for_each(|((lo, hi), twiddles)| {
                for ((a, b), w) in lo.iter_mut().zip(hi.iter_mut()).zip(twiddles) {
                    butterfly(a, b);
                    *b *= w;
                }
            });
    } else {
        // The first twiddle is always one
        butterfly(&mut lo[0], &mut hi[0]);
        for ((a, b), w) in lo.iter_mut().zip(hi.iter_mut()).zip(stage_twiddles).skip(1) {
            butterfly(a, b);
            *b *= w;
        }
    }

    if m == 1 {
        return;
    }

    let next_stage = stage + 1;
    if plan.splits_at(stage) {
        maybe_rayon::join(
            || dif_fft(lo, twiddles, next_stage, plan),
            || dif_fft(hi, twiddles, next_stage, plan),
        );
    } else {
        dif_fft(lo, twiddles, next_stage, plan);
        dif_fft(hi, twiddles, next_stage, plan);
    }
}

/// Decimation-in-time FFT of `values`, starting at recursion depth `stage`.
///
/// `twiddles[stage]` must hold at least `values.len() / 2` entries.
pub(crate) fn dit_fft<F: Field>(values: &mut [F], twiddles: &[Vec<F>], stage: usize, plan: Plan) {
    let n = values.len();
    if n == 1 {
        return;
    } else if n == 8 && plan.radix_8 {
        dit_kernel_8(values, twiddles, stage);
        return;
    }
    let m = n >> 1;

    let next_stage = stage + 1;
    let (lo, hi) = values.split_at_mut(m);
    if plan.splits_at(stage) {
        maybe_rayon::join(
            || dit_fft(lo, twiddles, next_stage, plan),
            || dit_fft(hi, twiddles, next_stage, plan),
        );
    } else {
        dit_fft(lo, twiddles, next_stage, plan);
        dit_fft(hi, twiddles, next_stage, plan);
    }

    let (lo, hi) = values.split_at_mut(m);
    let stage_twiddles = &twiddles[stage][..m];
    if m > BUTTERFLY_THRESHOLD && plan.splits_at(stage) {
        let chunk_size = maybe_rayon::chunk_size(m, plan.workers_at(stage));
        lo.maybe_par_chunks_mut(chunk_size)
            .zip(hi.maybe_par_chunks_mut(chunk_size))
            .zip(stage_twiddles.maybe_par_chunks(chunk_size))
            .for_each(|((lo, hi), twiddles)| {
                for ((a, b), w) in lo.iter_mut().zip(hi.iter_mut()).zip(twiddles) {
                    *b *= w;
                    butterfly(a, b);
                }
            });
    } else {
        butterfly(&mut lo[0], &mut hi[0]);
        for ((a, b), w) in lo.iter_mut().zip(hi.iter_mut()).zip(stage_twiddles).skip(1) {
            *b *= w;
            butterfly(a, b);
        }
    }
}

/// Size 8 DIT transform, equivalent to the last three levels of `dit_fft`.
///
/// Only `twiddles[stage]` and `twiddles[stage + 1]` are read; the twiddle of
/// the innermost level is always one.
fn dit_kernel_8<F: Field>(a: &mut [F], twiddles: &[Vec<F>], stage: usize) {
    let t0 = &twiddles[stage];
    let t1 = &twiddles[stage + 1];

    butterfly_at(a, 0, 1);
    butterfly_at(a, 2, 3);
    butterfly_at(a, 4, 5);
    butterfly_at(a, 6, 7);
    butterfly_at(a, 0, 2);
    a[3] *= t1[1];
    butterfly_at(a, 1, 3);
    butterfly_at(a, 4, 6);
    a[7] *= t1[1];
    butterfly_at(a, 5, 7);
    butterfly_at(a, 0, 4);
    a[5] *= t0[1];
    butterfly_at(a, 1, 5);
    a[6] *= t0[2];
    butterfly_at(a, 2, 6);
    a[7] *= t0[3];
    butterfly_at(a, 3, 7);
}

/// Size 8 DIF transform, equivalent to the last three levels of `dif_fft`.
fn dif_kernel_8<F: Field>(a: &mut [F], twiddles: &[Vec<F>], stage: usize) {
    let t0 = &twiddles[stage];
    let t1 = &twiddles[stage + 1];

    butterfly_at(a, 0, 4);
    butterfly_at(a, 1, 5);
    butterfly_at(a, 2, 6);
    butterfly_at(a, 3, 7);
    a[5] *= t0[1];
    a[6] *= t0[2];
    a[7] *= t0[3];
    butterfly_at(a, 0, 2);
    butterfly_at(a, 1, 3);
    butterfly_at(a, 4, 6);
    butterfly_at(a, 5, 7);
    a[3] *= t1[1];
    a[7] *= t1[1];
    butterfly_at(a, 0, 1);
    butterfly_at(a, 2, 3);
    butterfly_at(a, 4, 5);
    butterfly_at(a, 6, 7);
}

/// Reverses the least significant `bits` of the given number `n`.
///
/// `n` - The input number whose bits are to be reversed.
/// `bits` - The number of least significant bits to reverse.
///
/// Returns a new `usize` with the specified number of bits reversed.
pub const fn reverse_bits(n: usize, bits: u32) -> usize {
    // NB: The only reason we need overflowing_shr() here as opposed
    // to plain '>>' is to accommodate the case n == num_bits == 0,
    // which would become `0 >> 64`. Rust thinks that any shift of 64
    // bits causes overflow, even when the argument is zero.
    n.reverse_bits().overflowing_shr(usize::BITS - bits).0
}

/// In-place bit-reversal permutation of a slice.
///
/// Reorders the elements of the slice `a` in-place by reversing the binary representation of their indices.
///
/// For example, if `a.len() == 8` (i.e., `log2(n) = 3`), the index permutation would be:
///
/// ```text
/// Index  Binary   Reversed   Swapped With
/// -----  -------  ---------  -------------
///   0     000       000           -
///   1     001       100           4
///   2     010       010           -
///   3     011       110           6
///   4     100       001           1
///   5     101       101           -
///   6     110       011           3
///   7     111       111           -
/// ```
///
/// This transformation is its own inverse, so applying it twice restores the original order.
/// It converts between the natural order and the order used on the bit-reversed side
/// of a [`Decimation::DIT`] or [`Decimation::DIF`] transform.
///
/// # Panics
/// Panics if the slice length is not a power of two.
pub fn reverse_bit_order<T>(a: &mut [T]) {
    // WARNING: We should not go further if the slice is empty because it will panic:
    // The len is not a power of two.
    if a.is_empty() {
        return;
    }

    let n = a.len();
    assert!(n.is_power_of_two(), "n must be a power of two");

    let log_n = log2_pow2(n);
    for k in 0..n {
        let rk = reverse_bits(k, log_n);
        // Swap only if k < rk to avoid double-swapping
        if k < rk {
            a.swap(rk, k);
        }
    }
}

/// We assume that `n` is a power of 2.
pub(crate) const fn log2_pow2(n: usize) -> u32 {
    n.trailing_zeros()
}

#[cfg(test)]
mod tests {
    use bls12_381::Scalar;
    use rand::{prelude::SliceRandom, thread_rng};

    use super::*;

    #[test]
    fn plan_max_splits() {
        assert_eq!(Plan::new(0).max_splits, None);
        assert_eq!(Plan::new(1).max_splits, None);
        assert_eq!(Plan::new(2).max_splits, Some(1));
        assert_eq!(Plan::new(3).max_splits, Some(2));
        assert_eq!(Plan::new(4).max_splits, Some(2));
        assert_eq!(Plan::new(6).max_splits, Some(3));
        assert_eq!(Plan::new(64).max_splits, Some(6));
    }

    #[test]
    fn plan_workers_shrink_with_depth() {
        let plan = Plan::new(8);
        assert_eq!(plan.workers_at(0), 8);
        assert_eq!(plan.workers_at(1), 4);
        assert_eq!(plan.workers_at(3), 1);
        assert_eq!(plan.workers_at(10), 1);
        assert_eq!(plan.workers_at(200), 1);

        assert!(plan.splits_at(2));
        assert!(!plan.splits_at(3));
        assert!(!Plan::new(1).splits_at(0));
    }

    #[test]
    fn butterfly_smoke_test() {
        let mut a = Scalar::from(7u64);
        let mut b = Scalar::from(3u64);
        butterfly(&mut a, &mut b);
        assert_eq!(a, Scalar::from(10u64));
        assert_eq!(b, Scalar::from(4u64));

        // Applying it twice doubles both inputs
        butterfly(&mut a, &mut b);
        assert_eq!(a, Scalar::from(14u64));
        assert_eq!(b, Scalar::from(6u64));
    }

    #[test]
    fn test_reverse_bits_small() {
        assert_eq!(reverse_bits(0b000, 3), 0b000);
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b010, 3), 0b010);
        assert_eq!(reverse_bits(0b011, 3), 0b110);
        assert_eq!(reverse_bits(0b100, 3), 0b001);
        assert_eq!(reverse_bits(0b101, 3), 0b101);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(0b111, 3), 0b111);
    }

    #[test]
    fn test_reverse_bits_zero_zero() {
        // A naive `.reverse_bits() >> (usize::BITS - bits)` would shift by 64 here.
        assert_eq!(reverse_bits(0, 0), 0);
    }

    #[test]
    fn test_reverse_bit_order_len_4() {
        let mut arr = [10, 20, 30, 40];
        reverse_bit_order(&mut arr);
        assert_eq!(arr, [10, 30, 20, 40]);
    }

    #[test]
    fn test_reverse_bit_order_len_8() {
        let mut arr: Vec<u32> = (0..8).collect();
        reverse_bit_order(&mut arr);
        assert_eq!(arr, [0, 4, 2, 6, 1, 5, 3, 7]);
    }

    #[test]
    fn test_reverse_bit_order_trivial_lengths() {
        let mut empty: [u32; 0] = [];
        reverse_bit_order(&mut empty);
        assert_eq!(empty, []);

        let mut single = [42];
        reverse_bit_order(&mut single);
        assert_eq!(single, [42]);
    }

    #[test]
    #[should_panic(expected = "n must be a power of two")]
    fn test_reverse_bit_order_rejects_non_power_of_two() {
        let mut arr = [1, 2, 3];
        reverse_bit_order(&mut arr);
    }

    #[test]
    fn test_reverse_bit_order_is_an_involution() {
        let mut rng = thread_rng();
        for log_n in 0..=10 {
            let n = 1 << log_n;

            let mut original: Vec<u32> = (0..n).collect();
            original.shuffle(&mut rng);

            let mut reversed = original.clone();
            reverse_bit_order(&mut reversed);
            reverse_bit_order(&mut reversed);

            assert_eq!(
                reversed, original,
                "Mismatch after double reversal for len={n}"
            );
        }
    }
}
