//! Command-line argument surface for the Vigil monitor binary.

mod cli_args;

pub use cli_args::Cli;
