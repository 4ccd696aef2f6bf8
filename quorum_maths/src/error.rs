use thiserror::Error;

/// Failures of the arithmetic routines in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    /// The element shares a factor with the modulus, so it has no multiplicative inverse.
    #[error("element is not invertible modulo the given modulus")]
    NotInvertible,

    /// The matrix has no non-zero pivot in some column, its determinant vanishes modulo the prime.
    #[error("matrix is singular modulo the given prime")]
    SingularMatrix,

    /// Two moduli of a congruence system share a common factor.
    #[error("moduli of the congruence system are not pairwise coprime")]
    NonCoprimeModuli,

    /// A system without any equation or congruence was given.
    #[error("system contains no equations")]
    EmptySystem,

    /// Operand shapes do not fit together.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// The prime search examined its maximum number of candidates without certifying one.
    #[error("no certified prime found after examining {candidates} candidates")]
    CertificationExhausted { candidates: usize },
}
