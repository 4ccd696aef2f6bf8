use log::debug;
use num::{BigInt, BigUint, One, Zero};
use quorum_maths::modular::{add_mod, inverse_mod, mul_mod, random_below, random_bits, reduce_signed};
use quorum_maths::prime::PrimeSearch;
use quorum_maths::MathError;
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore};

use crate::lifecycle::{seed_from_os, Instance, SchemeState};
use crate::{check_indices, threshold_subset, Parameters, SharingError, ThresholdSecretSharingScheme};

/// Everything chosen while dealing shares: the field prime, the polynomial and its evaluations.
#[derive(Clone, Debug)]
struct ShamirDealing {
    prime: BigUint,
    coefficients: Vec<BigUint>,
    shares: Vec<(usize, BigUint)>,
}

/// Shamir's secret sharing scheme that uses polynomials of degree `threshold - 1` over a prime field and their
/// evaluations at `1..=parties` as shares. The secret is the constant coefficient, i.e. the evaluation at zero.
pub struct ShamirSecretSharing<R = StdRng> {
    instance: Instance<R, BigUint, ShamirDealing>,
}

impl ShamirSecretSharing<StdRng> {
    /// Validate the parameters and create an instance whose random number generator is seeded from the operating
    /// system.
    pub fn new(threshold: usize, parties: usize, security: usize) -> Result<Self, SharingError> {
        let parameters = Parameters::new(threshold, parties, security)?;
        Ok(Self::with_rng(parameters, seed_from_os()?))
    }
}

impl<R> ShamirSecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    pub fn with_rng(parameters: Parameters, rng: R) -> Self {
        ShamirSecretSharing {
            instance: Instance::new(parameters, rng),
        }
    }

    /// Replace the prime search, e.g. to bound it more tightly.
    pub fn with_prime_search(mut self, prime_search: PrimeSearch) -> Self {
        self.instance.prime_search = prime_search;
        self
    }

    /// The field prime, once shares have been generated.
    pub fn prime(&self) -> Option<&BigUint> {
        self.instance.lifecycle.dealing().map(|dealing| &dealing.prime)
    }

    /// The coefficients `a_0, ..., a_{threshold - 1}` of the sharing polynomial, where `a_0` is the secret.
    pub fn coefficients(&self) -> Option<&[BigUint]> {
        self.instance
            .lifecycle
            .dealing()
            .map(|dealing| dealing.coefficients.as_slice())
    }
}

impl<R> ThresholdSecretSharingScheme for ShamirSecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    type Secret = BigUint;
    type Modulus = BigUint;
    type Share = (usize, BigUint);

    fn parameters(&self) -> &Parameters {
        &self.instance.parameters
    }

    fn state(&self) -> SchemeState {
        self.instance.lifecycle.state()
    }

    fn generate_secret(&mut self) -> Result<(), SharingError> {
        self.instance.lifecycle.expect_initialized()?;
        let secret = random_bits(&mut self.instance.rng, self.instance.parameters.security());
        self.instance.lifecycle.store_secret(secret)
    }

    /// Choose a prime `p` above the secret, a random polynomial `f` over `GF(p)` with `f(0) = secret`, and hand out
    /// `(i, f(i))` to participant `i`.
    fn generate_shares(&mut self) -> Result<(), SharingError> {
        let secret = self.instance.lifecycle.secret_for_dealing()?.clone();
        let parameters = self.instance.parameters;

        let prime = self
            .instance
            .prime_search
            .random_prime_above(&mut self.instance.rng, &secret, parameters.security())?;
        debug!("selected {}-bit field prime", prime.bits());

        let mut coefficients = Vec::with_capacity(parameters.threshold());
        coefficients.push(secret);
        for _ in 1..parameters.threshold() {
            coefficients.push(random_below(&mut self.instance.rng, &prime));
        }

        let shares = (1..=parameters.parties())
            .map(|x| (x, evaluate(&coefficients, x, &prime)))
            .collect();

        self.instance.lifecycle.store_dealing(ShamirDealing {
            prime,
            coefficients,
            shares,
        })
    }

    /// Interpolates the secret using the Lagrange interpolation method.
    fn recover_secret(&self, shares: &[(usize, BigUint)]) -> Result<BigUint, SharingError> {
        let (_, dealing) = self.instance.lifecycle.dealt()?;
        let shares = threshold_subset(shares, self.instance.parameters.threshold())?;
        check_indices(shares.iter().map(|(index, _)| *index), self.instance.parameters.parties())?;

        Ok(interpolate_at_zero(shares, &dealing.prime)?)
    }

    fn secret(&self) -> Option<&BigUint> {
        self.instance.lifecycle.secret()
    }

    fn secret_value(&self) -> Option<&BigUint> {
        self.secret()
    }

    fn modulus(&self) -> Option<&BigUint> {
        self.prime()
    }

    fn shares(&self) -> Option<&[(usize, BigUint)]> {
        self.instance
            .lifecycle
            .dealing()
            .map(|dealing| dealing.shares.as_slice())
    }
}

/// Evaluate the polynomial with the given `coefficients` (lowest degree first) at `x`, accumulating the powers of
/// `x` modulo `prime` instead of recomputing them for every term.
fn evaluate(coefficients: &[BigUint], x: usize, prime: &BigUint) -> BigUint {
    let x = BigUint::from(x) % prime;
    let (value, _) = coefficients
        .iter()
        .fold((BigUint::zero(), BigUint::one()), |(sum, power), coefficient| {
            let sum = add_mod(&sum, &mul_mod(coefficient, &power, prime), prime);
            (sum, mul_mod(&power, &x, prime))
        });
    value
}

/// `f(0) = sum_i y_i * prod_{j != i} x_j / (x_j - x_i)` over `GF(prime)`.
fn interpolate_at_zero(shares: &[(usize, BigUint)], prime: &BigUint) -> Result<BigUint, MathError> {
    shares.iter().try_fold(BigUint::zero(), |sum, (i, value)| {
        let basis = shares
            .iter()
            .filter(|(j, _)| j != i)
            .try_fold(BigUint::one(), |product, (j, _)| -> Result<BigUint, MathError> {
                let denominator = reduce_signed(&(BigInt::from(*j) - BigInt::from(*i)), prime);
                let inverse = inverse_mod(&denominator, prime).ok_or(MathError::NotInvertible)?;
                let numerator = BigUint::from(*j) % prime;
                Ok(mul_mod(&mul_mod(&product, &numerator, prime), &inverse, prime))
            })?;
        Ok(add_mod(&sum, &mul_mod(&(value % prime), &basis, prime), prime))
    })
}
