//! Subcommand modules for the `chimr` binary.

pub mod detect;
pub mod pident;
pub mod vfilter;
