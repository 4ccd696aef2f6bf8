use std::fmt;

use quorum_maths::MathError;
use thiserror::Error;

/// The lifecycle operations of a sharing scheme instance, used to describe ordering errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    GenerateSecret,
    GenerateShares,
    RecoverSecret,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operation::GenerateSecret => write!(f, "secret generation"),
            Operation::GenerateShares => write!(f, "share generation"),
            Operation::RecoverSecret => write!(f, "secret recovery"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SharingError {
    #[error("({threshold},{parties}) scheme with security {security} is not valid: {reason}")]
    InvalidParameters {
        threshold: usize,
        parties: usize,
        security: usize,
        reason: &'static str,
    },

    #[error("{0} was already performed on this instance")]
    DuplicateOperation(Operation),

    #[error("{operation} requires {prerequisite} first")]
    MissingPrerequisite {
        operation: Operation,
        prerequisite: Operation,
    },

    #[error("prime certification gave up after examining {candidates} candidates")]
    PrimalityCertificationExhausted { candidates: usize },

    #[error("the system of shares is singular modulo the prime")]
    SingularSystem,

    #[error("{required} shares are required for recovery, but only {provided} were provided")]
    InsufficientShares { required: usize, provided: usize },

    #[error("invalid share: {0}")]
    InvalidShare(String),

    #[error("the prime chain violates the threshold inequality")]
    InvalidPrimeChain,

    #[error("operating system entropy is unavailable: {0}")]
    EntropyUnavailable(String),

    #[error(transparent)]
    Arithmetic(MathError),
}

impl From<MathError> for SharingError {
    fn from(error: MathError) -> Self {
        match error {
            MathError::CertificationExhausted { candidates } => {
                SharingError::PrimalityCertificationExhausted { candidates }
            }
            MathError::SingularMatrix => SharingError::SingularSystem,
            other => SharingError::Arithmetic(other),
        }
    }
}
