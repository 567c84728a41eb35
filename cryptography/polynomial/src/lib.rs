//! Parallel number-theoretic transforms over prime fields.
//!
//! A [`Domain`] holds the roots of unity and coset tables for one power-of-two
//! size. Transforms run in place on a caller-owned buffer, either decimating
//! in time or in frequency, optionally over a coset of the domain.
//!
//! With the `multithreaded` feature, the recursion is split between rayon
//! tasks until there are about as many tasks as threads in the pool.

pub mod domain;
pub mod errors;
mod fft;
pub mod poly_coeff;

pub use domain::Domain;
pub use errors::{DomainError, Error, FFTError};
pub use fft::{butterfly, reverse_bit_order, reverse_bits, Decimation};
pub use poly_coeff::PolyCoeff;
