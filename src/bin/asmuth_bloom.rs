use anyhow::Result;
use clap::Parser;
use quorum::cli::{self, SchemeArgs};
use quorum::quorum_sharing::AsmuthBloomSecretSharing;

fn main() -> Result<()> {
    let args = SchemeArgs::parse();
    args.init_logging()?;

    let scheme = AsmuthBloomSecretSharing::new(args.threshold, args.parties, args.security)?;
    cli::run(scheme)
}
