use std::ops::{Deref, DerefMut};

use bls12_381::ff::Field;

/// A polynomial in monomial form over the field `F`.
///
/// Internally stores coefficients in ascending order of degree:
///
/// ```text
/// Layout: x^0 * a_0 + x^1 * a_1 + ... + x^(n-1) * a_(n-1)
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Default)]
pub struct PolyCoeff<F>(pub Vec<F>);

impl<F: Field> PolyCoeff<F> {
    /// Evaluates the polynomial at the given point `x`.
    ///
    /// Uses Horner’s method for efficient evaluation.
    #[must_use]
    pub fn eval(&self, x: &F) -> F {
        let mut result = F::ZERO;
        for coeff in self.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Returns the index of the highest coefficient, or `None` for the empty polynomial.
    ///
    /// Trailing zero coefficients are counted, so this is an upper bound on the degree.
    pub fn degree(&self) -> Option<usize> {
        self.len().checked_sub(1)
    }
}

impl<F> Deref for PolyCoeff<F> {
    type Target = Vec<F>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F> DerefMut for PolyCoeff<F> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<F> From<Vec<F>> for PolyCoeff<F> {
    fn from(value: Vec<F>) -> Self {
        Self(value)
    }
}
