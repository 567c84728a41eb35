// Re-export ff, so other crates do not need to directly import(and independently version) it
pub use ff;

pub mod traits {
    pub use ff::{Field, PrimeField};
}

/// Scalar field element for the BLS12-381 curve.
///
/// This is the field the transforms are instantiated with by default. Its
/// multiplicative group has 2-adicity 32, so it supports domains of up to
/// `2^32` elements.
pub type Scalar = blstrs::Scalar;

/// The largest `k` such that the scalar field contains a primitive `2^k`-th
/// root of unity.
pub const TWO_ADICITY: u32 = <Scalar as ff::PrimeField>::S;

// Reduces bytes to be a value less than the scalar modulus.
#[allow(clippy::borrow_as_ptr)]
pub fn reduce_bytes_to_scalar_bias(bytes: [u8; 32]) -> Scalar {
    let mut out = blst::blst_fr::default();

    unsafe {
        // Convert byte array into a scalar
        let mut s = blst::blst_scalar::default();
        blst::blst_scalar_from_bendian(&mut s, &bytes as *const u8);
        // Convert scalar into a `blst_fr` reducing the value along the way
        blst::blst_fr_from_scalar(&mut out, std::ptr::addr_of!(s));
    }

    Scalar::from(out)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::traits::*;

    // BLS12-381 scalar field modulus (r)
    const BLS12_381_R: [u8; 32] = [
        0x73, 0xED, 0xA7, 0x53, 0x29, 0x9D, 0x7D, 0x48, 0x33, 0x39, 0xD8, 0x08, 0x09, 0xA1, 0xD8,
        0x05, 0x53, 0xBD, 0xA4, 0x02, 0xFF, 0xFE, 0x5B, 0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00,
        0x00, 0x01,
    ];

    #[test]
    fn two_adicity_is_32() {
        assert_eq!(TWO_ADICITY, 32);
    }

    #[test]
    fn root_of_unity_has_order_two_adicity() {
        let root = Scalar::ROOT_OF_UNITY;
        assert_eq!(root.pow_vartime([1u64 << TWO_ADICITY]), Scalar::ONE);
        assert_ne!(root.pow_vartime([1u64 << (TWO_ADICITY - 1)]), Scalar::ONE);
    }

    #[test]
    fn multiplicative_generator_is_not_a_two_adic_root() {
        // The generator has order r - 1, which is far larger than 2^32
        let g = Scalar::MULTIPLICATIVE_GENERATOR;
        assert_ne!(g.pow_vartime([1u64 << TWO_ADICITY]), Scalar::ONE);
    }

    #[test]
    fn test_reduce_bytes_to_scalar_edge_cases() {
        let result = reduce_bytes_to_scalar_bias([0u8; 32]);
        assert_eq!(result, Scalar::ZERO, "Zero input should result in zero scalar");

        let mut one_bytes = [0u8; 32];
        one_bytes[31] = 1;
        let result = reduce_bytes_to_scalar_bias(one_bytes);
        assert_eq!(result, Scalar::ONE, "One input should result in one scalar");

        // r - 1 (maximum value in the field)
        let mut max_bytes = BLS12_381_R;
        max_bytes[31] -= 1;
        let result = reduce_bytes_to_scalar_bias(max_bytes);
        assert_eq!(result, -Scalar::ONE, "r - 1 should equal -1 in the field");

        let result = reduce_bytes_to_scalar_bias(BLS12_381_R);
        assert_eq!(result, Scalar::ZERO, "r should reduce to zero");

        let mut r_plus_one = BLS12_381_R;
        r_plus_one[31] += 1;
        let result = reduce_bytes_to_scalar_bias(r_plus_one);
        assert_eq!(result, Scalar::ONE, "r + 1 should reduce to 1");
    }

    proptest! {
        #[test]
        fn prop_reduce_small_values_matches_from_u64(value in any::<u64>()) {
            let mut bytes = [0u8; 32];
            bytes[24..].copy_from_slice(&value.to_be_bytes());
            prop_assert_eq!(reduce_bytes_to_scalar_bias(bytes), Scalar::from(value));
        }
    }
}
