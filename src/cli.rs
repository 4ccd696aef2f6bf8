use anyhow::{bail, Result};
use clap::Parser;
use log::{info, LevelFilter};
use quorum_sharing::ThresholdSecretSharingScheme;
use simple_logger::SimpleLogger;

use crate::dump::Dump;

/// Deal a `(threshold, parties)` threshold secret sharing instance and verify its recovery.
#[derive(Debug, Parser)]
#[command(version, long_about = None)]
pub struct SchemeArgs {
    /// Number of shares required to recover the secret
    pub threshold: usize,

    /// Number of shares handed out
    pub parties: usize,

    /// Bit length of the secret, between 64 and 512
    pub security: usize,

    /// Log lifecycle transitions and modulus sizes
    #[arg(short, long)]
    pub verbose: bool,
}

impl SchemeArgs {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        }
    }

    pub fn init_logging(&self) -> Result<()> {
        SimpleLogger::new().with_level(self.log_level()).init()?;
        Ok(())
    }
}

/// Generate the secret and the shares of `scheme`, print its dump and recover the secret from the first threshold of
/// shares. A recovery that does not reproduce the secret is reported as an error.
pub fn run<S>(mut scheme: S) -> Result<()>
where
    S: ThresholdSecretSharingScheme + Dump,
{
    scheme.generate_secret()?;
    scheme.generate_shares()?;
    print!("{}", scheme.dump());

    let recovered = scheme.verify_recovery()?;
    println!(
        "recovery from {} shares: {}",
        scheme.parameters().threshold(),
        if recovered { "ok" } else { "FAILED" }
    );
    if !recovered {
        bail!("the recovered secret differs from the generated secret");
    }
    info!("recovery verified");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arguments() {
        let args = SchemeArgs::try_parse_from(["shamir", "3", "5", "128"]).unwrap();
        assert_eq!((args.threshold, args.parties, args.security), (3, 5, 128));
        assert_eq!(args.log_level(), LevelFilter::Warn);

        let args = SchemeArgs::try_parse_from(["blakely", "--verbose", "2", "2", "64"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.log_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_reject_malformed_arguments() {
        assert!(SchemeArgs::try_parse_from(["shamir", "3", "5"]).is_err());
        assert!(SchemeArgs::try_parse_from(["shamir", "3", "five", "64"]).is_err());
        assert!(SchemeArgs::try_parse_from(["shamir", "-3", "5", "64"]).is_err());
    }
}
