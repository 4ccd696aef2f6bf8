//! Arithmetic on residues of arbitrary moduli. All binary operations expect their operands to already be reduced
//! modulo `modulus` unless stated otherwise, and always return a reduced result. Sampling functions draw uniformly
//! distributed integers from a caller-provided cryptographically secure random number generator.

use num::integer::Integer;
use num::{BigInt, BigUint, One, Zero};
use num_bigint::RandBigInt;
use rand::{CryptoRng, RngCore};

/// Calculate `lhs + rhs mod modulus`.
pub fn add_mod(lhs: &BigUint, rhs: &BigUint, modulus: &BigUint) -> BigUint {
    (lhs + rhs) % modulus
}

/// Calculate `lhs - rhs mod modulus` without ever leaving the unsigned domain.
pub fn sub_mod(lhs: &BigUint, rhs: &BigUint, modulus: &BigUint) -> BigUint {
    let lhs = lhs % modulus;
    let rhs = rhs % modulus;
    if lhs >= rhs {
        lhs - rhs
    } else {
        modulus - (rhs - lhs)
    }
}

/// Calculate `lhs * rhs mod modulus`.
pub fn mul_mod(lhs: &BigUint, rhs: &BigUint, modulus: &BigUint) -> BigUint {
    (lhs * rhs) % modulus
}

/// Calculate the additive inverse `-value mod modulus`.
pub fn neg_mod(value: &BigUint, modulus: &BigUint) -> BigUint {
    let value = value % modulus;
    if value.is_zero() {
        value
    } else {
        modulus - value
    }
}

/// Map a signed integer onto its representative in `[0, modulus)`.
pub fn reduce_signed(value: &BigInt, modulus: &BigUint) -> BigUint {
    let modulus = BigInt::from(modulus.clone());
    value.mod_floor(&modulus).magnitude().clone()
}

/// Calculate the multiplicative inverse of `value` modulo `modulus` using the extended euclidean algorithm.
///
/// # Returns
/// `None` if `value` and `modulus` are not coprime (in particular if `value` is a multiple of a prime modulus).
pub fn inverse_mod(value: &BigUint, modulus: &BigUint) -> Option<BigUint> {
    if modulus.is_zero() {
        return None;
    }

    let value = BigInt::from(value % modulus);
    let egcd = value.extended_gcd(&BigInt::from(modulus.clone()));
    if egcd.gcd.is_one() {
        Some(reduce_signed(&egcd.x, modulus))
    } else {
        None
    }
}

/// Draw a uniformly random integer from `[0, 2^bits)`.
pub fn random_bits<R>(rng: &mut R, bits: usize) -> BigUint
where
    R: RngCore + CryptoRng,
{
    rng.gen_biguint(bits as u64)
}

/// Draw a uniformly random integer from `[0, bound)`. `bound` must not be zero.
pub fn random_below<R>(rng: &mut R, bound: &BigUint) -> BigUint
where
    R: RngCore + CryptoRng,
{
    rng.gen_biguint_below(bound)
}

/// Draw a uniformly random integer from `[low, high)`. `low` must be strictly less than `high`.
pub fn random_in_range<R>(rng: &mut R, low: &BigUint, high: &BigUint) -> BigUint
where
    R: RngCore + CryptoRng,
{
    rng.gen_biguint_range(low, high)
}

#[cfg(test)]
mod tests {
    use num::FromPrimitive;
    use rand::thread_rng;

    use super::*;

    fn big(value: u64) -> BigUint {
        BigUint::from_u64(value).unwrap()
    }

    #[test]
    fn test_subtraction_wraps() {
        assert_eq!(sub_mod(&big(3), &big(5), &big(7)), big(5));
        assert_eq!(sub_mod(&big(5), &big(3), &big(7)), big(2));
        assert_eq!(sub_mod(&big(4), &big(4), &big(7)), big(0));
    }

    #[test]
    fn test_negation() {
        assert_eq!(neg_mod(&big(1), &big(7)), big(6));
        assert_eq!(neg_mod(&big(0), &big(7)), big(0));
        assert_eq!(neg_mod(&big(14), &big(7)), big(0));
    }

    #[test]
    fn test_signed_reduction() {
        assert_eq!(reduce_signed(&BigInt::from(-1), &big(11)), big(10));
        assert_eq!(reduce_signed(&BigInt::from(-23), &big(11)), big(10));
        assert_eq!(reduce_signed(&BigInt::from(25), &big(11)), big(3));
    }

    #[test]
    fn test_inverse() {
        // 3 * 5 = 15 = 1 mod 7
        assert_eq!(inverse_mod(&big(3), &big(7)), Some(big(5)));
        assert_eq!(inverse_mod(&big(10), &big(7)), Some(big(5)));
        assert_eq!(inverse_mod(&big(0), &big(7)), None);
        assert_eq!(inverse_mod(&big(4), &big(8)), None);
    }

    #[test]
    fn test_inverse_of_large_prime_field_element() {
        // 2^89 - 1 is a mersenne prime
        let prime = (BigUint::one() << 89usize) - 1u32;
        let value = big(645_784);
        let inverse = inverse_mod(&value, &prime).unwrap();
        assert_eq!(mul_mod(&value, &inverse, &prime), BigUint::one());
    }

    #[test]
    fn test_sampling_bounds() {
        let mut rng = thread_rng();
        let bound = big(1000);
        for _ in 0..100 {
            assert!(random_bits(&mut rng, 64).bits() <= 64);
            assert!(random_below(&mut rng, &bound) < bound);
            let value = random_in_range(&mut rng, &big(10), &big(20));
            assert!(value >= big(10) && value < big(20));
        }
    }
}
