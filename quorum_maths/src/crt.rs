//! Reconstruction of an integer from its residues with the Chinese remainder theorem.

use num::{BigUint, One, Zero};

use crate::error::MathError;
use crate::modular::{inverse_mod, mul_mod, sub_mod};

/// Solve the system `x = residue_i mod modulus_i` for pairwise coprime moduli. The congruences are merged one at a
/// time: given `x = value mod product`, the next congruence is satisfied by
/// `x = value + product * ((residue - value) * product^-1 mod modulus)`.
///
/// # Parameters
/// - `congruences` pairs of `(residue, modulus)`
///
/// # Returns
/// The unique solution `x` in `[0, product)` together with the `product` of all moduli, or
/// `MathError::NonCoprimeModuli` if two moduli share a factor.
pub fn reconstruct(congruences: &[(BigUint, BigUint)]) -> Result<(BigUint, BigUint), MathError> {
    if congruences.is_empty() {
        return Err(MathError::EmptySystem);
    }

    let mut value = BigUint::zero();
    let mut product = BigUint::one();

    for (residue, modulus) in congruences {
        if modulus.is_zero() {
            return Err(MathError::NotInvertible);
        }

        let inverse = inverse_mod(&(&product % modulus), modulus).ok_or(MathError::NonCoprimeModuli)?;
        let difference = sub_mod(&(residue % modulus), &(&value % modulus), modulus);
        let lift = mul_mod(&difference, &inverse, modulus);

        value += &product * lift;
        product *= modulus;
    }

    Ok((value, product))
}
