//! Human readable listings of everything a dealt instance holds.

use std::fmt::{self, Write};

use num::BigUint;
use quorum_sharing::{
    AsmuthBloomSecretSharing, BlakelySecretSharing, ShamirSecretSharing, ThresholdSecretSharingScheme,
};
use rand::{CryptoRng, RngCore};

/// An instance that can list its secret, modulus, shares and scheme specific values.
pub trait Dump {
    fn write_dump<W: Write>(&self, out: &mut W) -> fmt::Result;

    fn dump(&self) -> String {
        let mut out = String::new();
        // writing into a string never fails
        let _ = self.write_dump(&mut out);
        out
    }
}

fn write_header<S, W>(scheme: &S, name: &str, out: &mut W) -> fmt::Result
where
    S: ThresholdSecretSharingScheme,
    W: Write,
{
    let parameters = scheme.parameters();
    writeln!(
        out,
        "{} ({},{}) scheme, security {}",
        name,
        parameters.threshold(),
        parameters.parties(),
        parameters.security()
    )?;
    match scheme.secret_value() {
        Some(secret) => writeln!(out, "secret: {}", secret),
        None => writeln!(out, "secret: not generated"),
    }
}

fn write_values<'a, I, W>(label: &str, values: I, out: &mut W) -> fmt::Result
where
    I: IntoIterator<Item = &'a BigUint>,
    W: Write,
{
    writeln!(out, "{}:", label)?;
    for (i, value) in values.into_iter().enumerate() {
        writeln!(out, "  [{}] {}", i, value)?;
    }
    Ok(())
}

impl<R> Dump for ShamirSecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    fn write_dump<W: Write>(&self, out: &mut W) -> fmt::Result {
        write_header(self, "shamir", out)?;
        if let Some(prime) = self.prime() {
            writeln!(out, "prime: {}", prime)?;
        }
        if let Some(coefficients) = self.coefficients() {
            write_values("polynomial coefficients", coefficients, out)?;
        }
        if let Some(shares) = self.shares() {
            writeln!(out, "shares:")?;
            for (x, y) in shares {
                writeln!(out, "  f({}) = {}", x, y)?;
            }
        }
        Ok(())
    }
}

impl<R> Dump for BlakelySecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    fn write_dump<W: Write>(&self, out: &mut W) -> fmt::Result {
        write_header(self, "blakely", out)?;
        if let Some(prime) = self.prime() {
            writeln!(out, "prime: {}", prime)?;
        }
        if let Some(point) = self.point() {
            write_values("intersection point", point, out)?;
        }
        if let Some(shares) = self.shares() {
            writeln!(out, "shares:")?;
            for plane in shares {
                let coefficients: Vec<String> = plane.coefficients.iter().map(BigUint::to_string).collect();
                writeln!(out, "  {}: ({})", plane.index, coefficients.join(", "))?;
            }
        }
        Ok(())
    }
}

impl<R> Dump for AsmuthBloomSecretSharing<R>
where
    R: RngCore + CryptoRng,
{
    fn write_dump<W: Write>(&self, out: &mut W) -> fmt::Result {
        write_header(self, "asmuth-bloom", out)?;
        if let Some(chain) = self.prime_chain() {
            write_values("prime chain", chain, out)?;
        }
        if let Some(alpha) = self.alpha() {
            writeln!(out, "alpha: {}", alpha)?;
        }
        if let Some(shares) = self.shares() {
            writeln!(out, "shares:")?;
            for share in shares {
                writeln!(out, "  {}: {} mod {}", share.index, share.residue, share.modulus)?;
            }
        }
        Ok(())
    }
}
