//! The Asmuth-Bloom scheme hands out residues of a blinded secret `y = s + alpha * m_0` modulo a chain of primes
//! `m_0 < m_1 < ... < m_n`. The chain is chosen such that the product of any `threshold` moduli `m_1, ..., m_n`
//! exceeds `y`, so the Chinese remainder theorem recovers `y` and thereby `s = y mod m_0`. Any `threshold - 1`
//! residues leave every residue class modulo `m_0` possible.

use log::{debug, error};
use num::{BigUint, Integer, Zero};
use quorum_maths::crt;
use quorum_maths::modular::{random_below, random_bits};
use quorum_maths::prime::PrimeSearch;
use quorum_maths::MathError;
use rand::rngs::StdRng;
use rand::{CryptoRng, RngCore};

use crate::lifecycle::{seed_from_os, Instance, SchemeState};
use crate::{check_indices, threshold_subset, Parameters, SharingError, ThresholdSecretSharingScheme};

/// The share of participant `index`: the blinded secret modulo that participant's prime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CongruenceShare {
    pub index: usize,
    pub residue: BigUint,
    pub modulus: BigUint,
}

#[derive(Clone, Debug)]
struct CongruenceDealing {
    chain: Vec<BigUint>,
    alpha: BigUint,
    shares: Vec<CongruenceShare>,
}

pub struct AsmuthBloomSecretSharing<R = StdRng> {
    instance: Instance<R, BigUint, CongruenceDealing>,
}

/// Check that `chain` (`m_0, ..., m_n`) is strictly increasing and that
/// `m_0 * m_{n-t+2} * ... * m_n < m_1 * ... * m_t`, i.e. that `m_0` times the `threshold - 1` largest moduli stays
/// below the product of the `threshold` smallest ones.
pub fn chain_satisfies_threshold(chain: &[BigUint], threshold: usize) -> bool {
    if threshold < 1 || chain.len() <= threshold {
        return false;
    }
    if chain.windows(2).any(|pair| pair[0] >= pair[1]) {
        return false;
    }

    let parties = chain.len() - 1;
    let smallest: BigUint = chain[1..=threshold].iter().product();
    let largest: BigUint = chain[parties + 2 - threshold..].iter().product();
    &chain[0] * largest < smallest
}

impl AsmuthBloomSecretSharing<StdRng> {
    /// Validate the parameters and create an instance whose random number generator is seeded from the operating
    /// system.
    pub fn new(threshold: usize, parties: usize, security: usize) -> Result<Self, SharingError> {
        let parameters = Parameters::new(threshold, parties, security)?;
        Ok(Self::with_rng(parameters, seed_from_os()?))
    }
}

impl<R> AsmuthBloomSecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    pub fn with_rng(parameters: Parameters, rng: R) -> Self {
        AsmuthBloomSecretSharing {
            instance: Instance::new(parameters, rng),
        }
    }

    pub fn with_prime_search(mut self, prime_search: PrimeSearch) -> Self {
        self.instance.prime_search = prime_search;
        self
    }

    /// The prime chain `m_0, ..., m_n`, once shares have been generated.
    pub fn prime_chain(&self) -> Option<&[BigUint]> {
        self.instance
            .lifecycle
            .dealing()
            .map(|dealing| dealing.chain.as_slice())
    }

    /// The blinding factor `alpha`.
    pub fn alpha(&self) -> Option<&BigUint> {
        self.instance.lifecycle.dealing().map(|dealing| &dealing.alpha)
    }

    /// Whether the prime chain of this instance satisfies the threshold inequality.
    ///
    /// # Returns
    /// `SharingError::MissingPrerequisite` if no chain has been chosen yet.
    pub fn validate_chain(&self) -> Result<bool, SharingError> {
        let (_, dealing) = self.instance.lifecycle.dealt()?;
        Ok(chain_satisfies_threshold(
            &dealing.chain,
            self.instance.parameters.threshold(),
        ))
    }

    /// `m_0` is the first prime above the secret, `m_1` the first prime above `2 * m_0` and every further modulus the
    /// next prime after its predecessor.
    fn choose_chain(&mut self, secret: &BigUint) -> Result<Vec<BigUint>, SharingError> {
        let search = &self.instance.prime_search;
        let rng = &mut self.instance.rng;
        let parties = self.instance.parameters.parties();

        let mut chain = Vec::with_capacity(parties + 1);
        let first = search.next_certified_prime(rng, secret)?;
        let mut previous = search.next_certified_prime(rng, &(&first << 1usize))?;
        chain.push(first);
        for _ in 1..parties {
            let next = search.next_certified_prime(rng, &previous)?;
            chain.push(previous);
            previous = next;
        }
        chain.push(previous);
        Ok(chain)
    }
}

impl<R> ThresholdSecretSharingScheme for AsmuthBloomSecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    type Secret = BigUint;
    type Modulus = [BigUint];
    type Share = CongruenceShare;

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

    /// Choose the prime chain, draw `alpha` uniformly from `[0, ceil((m_1 * ... * m_t - s) / m_0))` and hand out
    /// `(s + alpha * m_0) mod m_i` to participant `i`.
    fn generate_shares(&mut self) -> Result<(), SharingError> {
        let secret = self.instance.lifecycle.secret_for_dealing()?.clone();
        let parameters = self.instance.parameters;

        let chain = self.choose_chain(&secret)?;
        debug!(
            "selected prime chain of {} moduli, m_0 has {} bits",
            chain.len(),
            chain[0].bits()
        );
        if !chain_satisfies_threshold(&chain, parameters.threshold()) {
            error!(
                "prime chain for ({},{}) violates the threshold inequality",
                parameters.threshold(),
                parameters.parties()
            );
            return Err(SharingError::InvalidPrimeChain);
        }

        let smallest: BigUint = chain[1..=parameters.threshold()].iter().product();
        let bound = Integer::div_ceil(&(smallest - &secret), &chain[0]);
        let alpha = if bound.is_zero() {
            BigUint::zero()
        } else {
            random_below(&mut self.instance.rng, &bound)
        };

        let blinded = &secret + &alpha * &chain[0];
        let shares = chain[1..]
            .iter()
            .enumerate()
            .map(|(i, modulus)| CongruenceShare {
                index: i + 1,
                residue: &blinded % modulus,
                modulus: modulus.clone(),
            })
            .collect();

        self.instance.lifecycle.store_dealing(CongruenceDealing { chain, alpha, shares })
    }

    /// Reconstructs the blinded secret with the Chinese remainder theorem and reduces it modulo `m_0`.
    fn recover_secret(&self, shares: &[CongruenceShare]) -> Result<BigUint, SharingError> {
        let (_, dealing) = self.instance.lifecycle.dealt()?;
        let shares = threshold_subset(shares, self.instance.parameters.threshold())?;
        check_indices(shares.iter().map(|share| share.index), self.instance.parameters.parties())?;

        let congruences: Vec<(BigUint, BigUint)> = shares
            .iter()
            .map(|share| (share.residue.clone(), share.modulus.clone()))
            .collect();
        let (blinded, _) = crt::reconstruct(&congruences).map_err(|error| match error {
            MathError::NonCoprimeModuli | MathError::NotInvertible => {
                SharingError::InvalidShare("share moduli are not pairwise coprime".to_string())
            }
            other => other.into(),
        })?;

        Ok(blinded % &dealing.chain[0])
    }

    fn secret(&self) -> Option<&BigUint> {
        self.instance.lifecycle.secret()
    }

    fn secret_value(&self) -> Option<&BigUint> {
        self.secret()
    }

    fn modulus(&self) -> Option<&[BigUint]> {
        self.prime_chain()
    }

    fn shares(&self) -> Option<&[CongruenceShare]> {
        self.instance
            .lifecycle
            .dealing()
            .map(|dealing| dealing.shares.as_slice())
    }
}
