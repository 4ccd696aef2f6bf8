//! A crate containing the number-theoretic and linear-algebraic building blocks of the threshold sharing schemes:
//! modular arithmetic on big integers, uniform sampling, probabilistic primality certification, determinants and
//! cofactors modulo a prime, and reconstruction with the Chinese remainder theorem.

pub mod crt;
pub mod error;
pub mod matrix;
pub mod modular;
pub mod prime;

pub use error::MathError;
pub use num_bigint;
