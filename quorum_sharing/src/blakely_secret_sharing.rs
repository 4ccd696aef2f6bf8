//! Blakely's geometric secret sharing scheme. The secret is the first coordinate of a random point in
//! `threshold`-dimensional space over `GF(p)`, and every participant receives a random hyperplane through that
//! point. Any `threshold` hyperplanes in general position intersect in exactly the secret point, while fewer
//! intersect in a line or more, which contains every candidate for the first coordinate.

use log::debug;
use num::BigUint;
use quorum_maths::matrix::SquareMatrix;
use quorum_maths::modular::{mul_mod, neg_mod, random_below, random_bits, sub_mod};
use quorum_maths::prime::PrimeSearch;
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore};

use crate::lifecycle::{seed_from_os, Instance, SchemeState};
use crate::{check_indices, threshold_subset, Parameters, SharingError, ThresholdSecretSharingScheme};

/// The share of participant `index`: the hyperplane
/// `c_0 * x_0 + ... + c_{t-2} * x_{t-2} - x_{t-1} = -c_{t-1}` given by its `coefficients` `c_0, ..., c_{t-1}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hyperplane {
    pub index: usize,
    pub coefficients: Vec<BigUint>,
}

/// The secret point together with the prime of the field it lives in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretPoint {
    coordinates: Vec<BigUint>,
    prime: BigUint,
}

impl SecretPoint {
    pub fn coordinates(&self) -> &[BigUint] {
        &self.coordinates
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }
}

pub struct BlakelySecretSharing<R = StdRng> {
    instance: Instance<R, SecretPoint, Vec<Hyperplane>>,
}

impl BlakelySecretSharing<StdRng> {
    /// Validate the parameters and create an instance whose random number generator is seeded from the operating
    /// system.
    pub fn new(threshold: usize, parties: usize, security: usize) -> Result<Self, SharingError> {
        let parameters = Parameters::new(threshold, parties, security)?;
        Ok(Self::with_rng(parameters, seed_from_os()?))
    }
}

impl<R> BlakelySecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    pub fn with_rng(parameters: Parameters, rng: R) -> Self {
        BlakelySecretSharing {
            instance: Instance::new(parameters, rng),
        }
    }

    pub fn with_prime_search(mut self, prime_search: PrimeSearch) -> Self {
        self.instance.prime_search = prime_search;
        self
    }

    /// Intersect `threshold` hyperplanes and return the first coordinate of their intersection point. The planes are
    /// stacked into the system `A x = b` with rows `(c_0, ..., c_{t-2}, -1)` and right-hand side `-c_{t-1}`, which is
    /// then solved for `x_0` with Cramer's rule modulo `prime`.
    ///
    /// # Returns
    /// The first coordinate, or `SharingError::SingularSystem` if the hyperplanes do not intersect in a single point.
    pub fn intersect(hyperplanes: &[Hyperplane], prime: &BigUint) -> Result<BigUint, SharingError> {
        let dimension = hyperplanes.len();
        let minus_one = neg_mod(&BigUint::from(1u32), prime);

        let mut rows = Vec::with_capacity(dimension);
        let mut rhs = Vec::with_capacity(dimension);
        for plane in hyperplanes {
            let (constant, random) = match plane.coefficients.split_last() {
                Some(split) if plane.coefficients.len() == dimension => split,
                _ => {
                    return Err(SharingError::InvalidShare(format!(
                        "hyperplane {} has {} coefficients instead of {}",
                        plane.index,
                        plane.coefficients.len(),
                        dimension
                    )))
                }
            };

            let mut row: Vec<BigUint> = random.iter().map(|c| c % prime).collect();
            row.push(minus_one.clone());
            rows.push(row);
            rhs.push(neg_mod(constant, prime));
        }

        let matrix = SquareMatrix::from_rows(rows)?;
        Ok(matrix.solve_unknown_mod(0, &rhs, prime)?)
    }

    /// The whole intersection point, once a secret has been generated.
    pub fn point(&self) -> Option<&[BigUint]> {
        self.secret().map(|secret| secret.coordinates())
    }

    pub fn prime(&self) -> Option<&BigUint> {
        self.secret().map(|secret| secret.prime())
    }
}

impl<R> ThresholdSecretSharingScheme for BlakelySecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    type Secret = SecretPoint;
    type Modulus = BigUint;
    type Share = Hyperplane;

    fn parameters(&self) -> &Parameters {
        &self.instance.parameters
    }

    fn state(&self) -> SchemeState {
        self.instance.lifecycle.state()
    }

    /// Choose the secret `s_0`, a prime `p > s_0` and the remaining coordinates `s_1, ..., s_{t-1}` of the secret
    /// point uniformly from `GF(p)`.
    fn generate_secret(&mut self) -> Result<(), SharingError> {
        self.instance.lifecycle.expect_initialized()?;
        let parameters = self.instance.parameters;
        let rng = &mut self.instance.rng;

        let secret = random_bits(rng, parameters.security());
        let prime = self
            .instance
            .prime_search
            .random_prime_above(rng, &secret, parameters.security())?;
        debug!("selected {}-bit field prime", prime.bits());

        let mut coordinates = Vec::with_capacity(parameters.threshold());
        coordinates.push(secret);
        for _ in 1..parameters.threshold() {
            coordinates.push(random_below(rng, &prime));
        }

        self.instance
            .lifecycle
            .store_secret(SecretPoint { coordinates, prime })
    }

    /// Every participant receives `t - 1` random coefficients `c_j` and the constant
    /// `c_{t-1} = s_{t-1} - sum_j c_j * s_j mod p`, so that the secret point lies on its hyperplane.
    fn generate_shares(&mut self) -> Result<(), SharingError> {
        let point = self.instance.lifecycle.secret_for_dealing()?.clone();
        let parameters = self.instance.parameters;
        let prime = &point.prime;
        // the point has exactly `threshold >= 2` coordinates
        let (leading, last) = point.coordinates.split_at(parameters.threshold() - 1);
        let last = &last[0];

        let mut shares = Vec::with_capacity(parameters.parties());
        for index in 1..=parameters.parties() {
            let mut coefficients: Vec<BigUint> = (0..leading.len())
                .map(|_| random_below(&mut self.instance.rng, prime))
                .collect();
            let constant = coefficients
                .iter()
                .zip(leading)
                .fold(last.clone(), |constant, (c, s)| sub_mod(&constant, &mul_mod(c, s, prime), prime));
            coefficients.push(constant);
            shares.push(Hyperplane { index, coefficients });
        }

        self.instance.lifecycle.store_dealing(shares)
    }

    fn recover_secret(&self, shares: &[Hyperplane]) -> Result<BigUint, SharingError> {
        let (point, _) = self.instance.lifecycle.dealt()?;
        let shares = threshold_subset(shares, self.instance.parameters.threshold())?;
        check_indices(shares.iter().map(|plane| plane.index), self.instance.parameters.parties())?;

        Self::intersect(shares, &point.prime)
    }

    fn secret(&self) -> Option<&SecretPoint> {
        self.instance.lifecycle.secret()
    }

    fn secret_value(&self) -> Option<&BigUint> {
        self.point().and_then(|point| point.first())
    }

    fn modulus(&self) -> Option<&BigUint> {
        self.prime()
    }

    fn shares(&self) -> Option<&[Hyperplane]> {
        self.instance.lifecycle.dealing().map(|shares| shares.as_slice())
    }
}
