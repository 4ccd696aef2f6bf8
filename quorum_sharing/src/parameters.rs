use quorum_maths::prime::PrimeSearch;

use crate::constants::{MAX_PARTIES, MAX_SECURITY, MIN_SECURITY, MIN_THRESHOLD};
use crate::error::SharingError;

/// Validated parameters of a `(threshold, parties)` scheme with security parameter `security`, the bit length of the
/// secret. Holding a `Parameters` value proves `2 <= threshold <= parties <= 1000` and `64 <= security <= 512`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Parameters {
    threshold: usize,
    parties: usize,
    security: usize,
}

impl Parameters {
    pub fn new(threshold: usize, parties: usize, security: usize) -> Result<Self, SharingError> {
        let invalid = |reason| SharingError::InvalidParameters {
            threshold,
            parties,
            security,
            reason,
        };

        if threshold < MIN_THRESHOLD {
            Err(invalid("threshold must be at least 2"))
        } else if threshold > parties {
            Err(invalid("threshold must not exceed the number of parties"))
        } else if parties > MAX_PARTIES {
            Err(invalid("at most 1000 parties are supported"))
        } else if security < MIN_SECURITY || security > MAX_SECURITY {
            Err(invalid("security parameter must lie between 64 and 512"))
        } else {
            Ok(Parameters {
                threshold,
                parties,
                security,
            })
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    pub fn security(&self) -> usize {
        self.security
    }

    /// The prime search certifying primes with error probability at most `2^-(security / 2)`.
    pub fn prime_search(&self) -> PrimeSearch {
        PrimeSearch::for_security(self.security)
    }
}
