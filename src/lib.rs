//! Command line front end of the threshold secret sharing schemes in `quorum_sharing`. Every binary deals one
//! instance with the parameters given on the command line, prints everything the instance holds and checks that the
//! secret is recovered from a threshold of shares.

pub use quorum_maths;
pub use quorum_sharing;

pub mod cli;
pub mod dump;
