//! CLI module
//!
//! Command-line interface for running the pipeline.
//!
//! # Commands
//!
//! - `run` - Execute the pipeline once and print a `RUN_SUMMARY` message
//! - `validate` - Load and validate the configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{Overrides, Runner};
