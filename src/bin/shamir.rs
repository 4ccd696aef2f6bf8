use anyhow::Result;
use clap::Parser;
use quorum::cli::{self, SchemeArgs};
use quorum::quorum_sharing::ShamirSecretSharing;

fn main() -> Result<()> {
    let args = SchemeArgs::parse();
    args.init_logging()?;

    let scheme = ShamirSecretSharing::new(args.threshold, args.parties, args.security)?;
    cli::run(scheme)
}
