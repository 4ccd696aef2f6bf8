//! This module provides the bounded search for certified primes that every modulus of the sharing schemes is
//! obtained from. A search walks upwards from a starting point, discards candidates with an inexpensive screen, and
//! only trusts a candidate once it has been certified by a Miller-Rabin test with randomly drawn bases.

use log::trace;
use num::integer::Integer;
use num::{BigUint, One};
use rand::{CryptoRng, RngCore};

use crate::error::MathError;
use crate::modular::random_in_range;
use crate::prime_test::{MillerRabin, PrimeTest};

/// Default upper bound on the number of candidates a single search examines. Prime gaps at the supported sizes are
/// orders of magnitude smaller, so hitting this bound indicates a broken random number generator or parameters.
pub const DEFAULT_MAX_CANDIDATES: usize = 1 << 20;

/// Configuration of a prime search: how thoroughly a candidate is certified and how long the search may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrimeSearch {
    certifier: MillerRabin,
    max_candidates: usize,
}

impl PrimeSearch {
    pub fn new(certifier: MillerRabin, max_candidates: usize) -> Self {
        PrimeSearch {
            certifier,
            max_candidates,
        }
    }

    /// A search whose certified primes are composite with probability at most `2^-(security / 2)`.
    pub fn for_security(security: usize) -> Self {
        Self::new(
            MillerRabin::for_error_exponent((security + 1) / 2),
            DEFAULT_MAX_CANDIDATES,
        )
    }

    /// Replace the bound on examined candidates.
    pub fn with_max_candidates(self, max_candidates: usize) -> Self {
        PrimeSearch {
            max_candidates,
            ..self
        }
    }

    pub fn certification_rounds(&self) -> usize {
        self.certifier.rounds()
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Find the smallest certified prime strictly greater than `after`.
    ///
    /// # Parameters
    /// - `rng` a cryptographically secure random number generator supplying the certification bases
    /// - `after` the exclusive lower bound of the search
    ///
    /// # Returns
    /// The prime, or `MathError::CertificationExhausted` if `max_candidates` candidates were examined without
    /// certifying any of them.
    pub fn next_certified_prime<R>(&self, rng: &mut R, after: &BigUint) -> Result<BigUint, MathError>
    where
        R: RngCore + CryptoRng,
    {
        let exhausted = MathError::CertificationExhausted {
            candidates: self.max_candidates,
        };

        let two = BigUint::from(2u32);
        if *after < two {
            return if self.max_candidates == 0 {
                Err(exhausted)
            } else {
                Ok(two)
            };
        }

        let mut candidate = after + 1u32;
        if candidate.is_even() {
            candidate += 1u32;
        }

        for examined in 1..=self.max_candidates {
            if MillerRabin::screen(&candidate) {
                if self.certifier.is_prime(&candidate, rng) {
                    trace!(
                        "certified {}-bit prime after {} candidates",
                        candidate.bits(),
                        examined
                    );
                    return Ok(candidate);
                }
                trace!("candidate passed the screen but failed certification");
            }
            candidate += 2u32;
        }

        Err(exhausted)
    }

    /// Draw a random starting point in `(floor, 2^bits)` and return the next certified prime above it. The result
    /// is therefore always strictly greater than `floor`. If the interval is empty, the search starts at `floor`.
    pub fn random_prime_above<R>(&self, rng: &mut R, floor: &BigUint, bits: usize) -> Result<BigUint, MathError>
    where
        R: RngCore + CryptoRng,
    {
        let low = floor + 1u32;
        let high = BigUint::one() << bits;
        let start = if low < high {
            random_in_range(rng, &low, &high)
        } else {
            floor.clone()
        };
        self.next_certified_prime(rng, &start)
    }
}
