//! Command-line interface
//!
//! `spec`, `check`, `discover` and `read` subcommands emitting NDJSON
//! messages on stdout.

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
