//! Threshold secret sharing schemes over big integers. Every scheme splits a randomly generated secret into
//! `parties` shares such that any `threshold` of them reconstruct it, while fewer do not.
//!
//! Three independent constructions are provided:
//! - `ShamirSecretSharing` evaluates a random polynomial over a prime field and recovers by Lagrange interpolation
//! - `BlakelySecretSharing` hands out hyperplanes through a secret point and recovers by Cramer's rule
//! - `AsmuthBloomSecretSharing` hands out residues of a blinded secret and recovers by the Chinese remainder theorem

use std::collections::HashSet;

use log::warn;
use num::BigUint;

pub mod asmuth_bloom_secret_sharing;
pub mod blakely_secret_sharing;
pub mod constants;
pub mod error;
pub mod lifecycle;
pub mod parameters;
pub mod shamir_secret_sharing;

#[cfg(test)]
mod tests;

pub use asmuth_bloom_secret_sharing::{AsmuthBloomSecretSharing, CongruenceShare};
pub use blakely_secret_sharing::{BlakelySecretSharing, Hyperplane};
pub use error::{Operation, SharingError};
pub use lifecycle::SchemeState;
pub use parameters::Parameters;
pub use shamir_secret_sharing::ShamirSecretSharing;

/// A threshold secret sharing scheme instance. It owns its secret, the modulus (or moduli) the shares are computed
/// with, and the table of all shares, and exposes them read-only. Generation happens exactly once per instance and
/// in order: first the secret, then the shares.
pub trait ThresholdSecretSharingScheme {
    /// The secret as generated by the instance.
    type Secret;
    /// The public modulus or moduli shares are computed with.
    type Modulus: ?Sized;
    /// A single participant's share.
    type Share;

    fn parameters(&self) -> &Parameters;

    fn state(&self) -> SchemeState;

    /// Generate a random secret of `security` bits.
    ///
    /// # Returns
    /// `SharingError::DuplicateOperation` if the instance already has a secret.
    fn generate_secret(&mut self) -> Result<(), SharingError>;

    /// Generate one share per party for the secret of this instance, choosing the modulus if not done yet.
    ///
    /// # Returns
    /// `SharingError::MissingPrerequisite` without a secret, `SharingError::DuplicateOperation` if shares exist.
    fn generate_shares(&mut self) -> Result<(), SharingError>;

    /// Reconstruct the secret value from a collection of shares. The first `threshold` shares are used, fewer are
    /// rejected with `SharingError::InsufficientShares`. This never modifies the instance.
    ///
    /// # Parameters
    /// - `shares` a collection of at least `threshold` shares of this instance
    fn recover_secret(&self, shares: &[Self::Share]) -> Result<BigUint, SharingError>;

    fn secret(&self) -> Option<&Self::Secret>;

    /// The value that recovery reproduces.
    fn secret_value(&self) -> Option<&BigUint>;

    fn modulus(&self) -> Option<&Self::Modulus>;

    /// The full share table, ordered by participant index `1..=parties`.
    fn shares(&self) -> Option<&[Self::Share]>;

    /// Recover the secret from the first `threshold` shares of the share table and compare it with the secret.
    fn verify_recovery(&self) -> Result<bool, SharingError> {
        let shares = self.shares().ok_or(SharingError::MissingPrerequisite {
            operation: Operation::RecoverSecret,
            prerequisite: Operation::GenerateShares,
        })?;
        let recovered = self.recover_secret(&shares[..self.parameters().threshold()])?;
        Ok(self.secret_value() == Some(&recovered))
    }
}

/// The first `threshold` shares, or `SharingError::InsufficientShares` if there are fewer.
pub(crate) fn threshold_subset<S>(shares: &[S], threshold: usize) -> Result<&[S], SharingError> {
    if shares.len() < threshold {
        warn!(
            "rejected recovery from {} shares below threshold {}",
            shares.len(),
            threshold
        );
        Err(SharingError::InsufficientShares {
            required: threshold,
            provided: shares.len(),
        })
    } else {
        Ok(&shares[..threshold])
    }
}

/// Ensure participant indices lie in `1..=parties` and are pairwise distinct.
pub(crate) fn check_indices<I>(indices: I, parties: usize) -> Result<(), SharingError>
where
    I: IntoIterator<Item = usize>,
{
    let mut seen = HashSet::new();
    for index in indices {
        if index == 0 || index > parties {
            return Err(SharingError::InvalidShare(format!(
                "participant index {} outside of 1..={}",
                index, parties
            )));
        }
        if !seen.insert(index) {
            return Err(SharingError::InvalidShare(format!(
                "participant index {} given more than once",
                index
            )));
        }
    }
    Ok(())
}
