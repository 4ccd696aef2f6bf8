//! The lifecycle every scheme instance goes through. An instance only comes into existence through validated
//! construction and then advances `Initialized -> SecretSet -> SharesGenerated`. Each state carries exactly the data
//! that exists in it, so shares can never be observed without the secret they were dealt from, and the only way to
//! advance is through the transition methods below.

use std::mem;

use log::debug;
use quorum_maths::prime::PrimeSearch;
use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

use crate::error::{Operation, SharingError};
use crate::parameters::Parameters;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemeState {
    Initialized,
    SecretSet,
    SharesGenerated,
}

/// Lifecycle state holding the secret `S` once generated and the dealing `D` (modulus, shares and auxiliary
/// values) once shares have been generated.
#[derive(Clone, Debug)]
pub(crate) enum Lifecycle<S, D> {
    Initialized,
    SecretSet(S),
    SharesGenerated(S, D),
}

impl<S, D> Lifecycle<S, D> {
    pub(crate) fn state(&self) -> SchemeState {
        match self {
            Lifecycle::Initialized => SchemeState::Initialized,
            Lifecycle::SecretSet(_) => SchemeState::SecretSet,
            Lifecycle::SharesGenerated(..) => SchemeState::SharesGenerated,
        }
    }

    pub(crate) fn secret(&self) -> Option<&S> {
        match self {
            Lifecycle::Initialized => None,
            Lifecycle::SecretSet(secret) | Lifecycle::SharesGenerated(secret, _) => Some(secret),
        }
    }

    pub(crate) fn dealing(&self) -> Option<&D> {
        match self {
            Lifecycle::SharesGenerated(_, dealing) => Some(dealing),
            _ => None,
        }
    }

    /// Succeeds only if no secret exists yet.
    pub(crate) fn expect_initialized(&self) -> Result<(), SharingError> {
        match self {
            Lifecycle::Initialized => Ok(()),
            _ => Err(SharingError::DuplicateOperation(Operation::GenerateSecret)),
        }
    }

    pub(crate) fn store_secret(&mut self, secret: S) -> Result<(), SharingError> {
        self.expect_initialized()?;
        *self = Lifecycle::SecretSet(secret);
        debug!("instance advanced to {:?}", self.state());
        Ok(())
    }

    /// The secret shares are about to be dealt from. Fails if there is no secret yet or if shares already exist.
    pub(crate) fn secret_for_dealing(&self) -> Result<&S, SharingError> {
        match self {
            Lifecycle::Initialized => Err(SharingError::MissingPrerequisite {
                operation: Operation::GenerateShares,
                prerequisite: Operation::GenerateSecret,
            }),
            Lifecycle::SecretSet(secret) => Ok(secret),
            Lifecycle::SharesGenerated(..) => Err(SharingError::DuplicateOperation(Operation::GenerateShares)),
        }
    }

    pub(crate) fn store_dealing(&mut self, dealing: D) -> Result<(), SharingError> {
        match mem::replace(self, Lifecycle::Initialized) {
            Lifecycle::SecretSet(secret) => {
                *self = Lifecycle::SharesGenerated(secret, dealing);
                debug!("instance advanced to {:?}", self.state());
                Ok(())
            }
            previous => {
                let error = previous.secret_for_dealing().err();
                *self = previous;
                Err(error.unwrap_or(SharingError::DuplicateOperation(Operation::GenerateShares)))
            }
        }
    }

    /// Secret and dealing, as required for recovery.
    pub(crate) fn dealt(&self) -> Result<(&S, &D), SharingError> {
        match self {
            Lifecycle::SharesGenerated(secret, dealing) => Ok((secret, dealing)),
            _ => Err(SharingError::MissingPrerequisite {
                operation: Operation::RecoverSecret,
                prerequisite: Operation::GenerateShares,
            }),
        }
    }
}

/// The state every engine owns: its parameters, the prime search configuration, its random number generator, and
/// its position in the lifecycle.
#[derive(Debug)]
pub(crate) struct Instance<R, S, D> {
    pub(crate) parameters: Parameters,
    pub(crate) prime_search: PrimeSearch,
    pub(crate) rng: R,
    pub(crate) lifecycle: Lifecycle<S, D>,
}

impl<R, S, D> Instance<R, S, D> {
    pub(crate) fn new(parameters: Parameters, rng: R) -> Self {
        debug!(
            "initialized ({},{}) instance with security {}",
            parameters.threshold(),
            parameters.parties(),
            parameters.security()
        );
        Instance {
            prime_search: parameters.prime_search(),
            parameters,
            rng,
            lifecycle: Lifecycle::Initialized,
        }
    }
}

/// Seed a cryptographically secure generator from the operating system's entropy source.
pub(crate) fn seed_from_os() -> Result<StdRng, SharingError> {
    StdRng::from_rng(OsRng).map_err(|error| SharingError::EntropyUnavailable(error.to_string()))
}
