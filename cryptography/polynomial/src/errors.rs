use std::fmt;

/// Errors that can occur while constructing a [`Domain`](crate::Domain).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// Raised when the requested domain size is zero or not a power of two.
    SizeNotPowerOfTwo {
        /// The requested domain size.
        size: usize,
    },

    /// Raised when the field has no multiplicative subgroup of the requested size.
    ///
    /// A field with 2-adicity `s` only supports domains of up to `2^s` elements.
    SizeExceedsTwoAdicity {
        /// The requested domain size.
        size: usize,
        /// The 2-adicity of the field's multiplicative group.
        two_adicity: u32,
    },

    /// Raised when the coset shift is zero or lies inside the domain itself,
    /// in which case the coset would not be disjoint from the domain.
    InvalidCosetShift,
}

/// Errors that can occur when running a transform against a [`Domain`](crate::Domain).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FFTError {
    /// Raised when the buffer handed to a transform does not have exactly
    /// as many elements as the domain.
    ///
    /// The buffer is left untouched in that case.
    LengthMismatch {
        /// Number of elements in the buffer.
        num_values: usize,
        /// Size of the domain.
        domain_size: usize,
    },

    /// Raised when a polynomial has more coefficients than there are points
    /// in the domain, so it cannot be evaluated without losing information.
    PolynomialTooLarge {
        /// Number of coefficients in the polynomial.
        num_coefficients: usize,
        /// Size of the domain.
        domain_size: usize,
    },
}

/// Errors that can occur either during domain construction or during a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Error that occurred while building the domain.
    Domain(DomainError),
    /// Error that occurred while running a transform.
    FFT(FFTError),
}

impl From<DomainError> for Error {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}

impl From<FFTError> for Error {
    fn from(value: FFTError) -> Self {
        Self::FFT(value)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeNotPowerOfTwo { size } => {
                write!(f, "domain size {size} is not a power of two")
            }
            Self::SizeExceedsTwoAdicity { size, two_adicity } => write!(
                f,
                "domain size {size} exceeds the largest supported size 2^{two_adicity}"
            ),
            Self::InvalidCosetShift => {
                f.write_str("coset shift must be non-zero and outside of the domain")
            }
        }
    }
}

impl fmt::Display for FFTError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                num_values,
                domain_size,
            } => write!(
                f,
                "expected {domain_size} values for the transform, but got {num_values}"
            ),
            Self::PolynomialTooLarge {
                num_coefficients,
                domain_size,
            } => write!(
                f,
                "polynomial has {num_coefficients} coefficients, which does not fit in a domain of size {domain_size}"
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(err) => err.fmt(f),
            Self::FFT(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for DomainError {}
impl std::error::Error for FFTError {}
impl std::error::Error for Error {}
