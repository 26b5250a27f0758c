//! Command-line interface
//!
//! Argument parsing with clap and the runner that maps parsed flags onto
//! pager options, selectors, and output sinks.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, PageArgs};
pub use runner::Runner;
