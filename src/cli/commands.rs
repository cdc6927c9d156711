//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Patent category pipeline CLI
#[derive(Parser, Debug)]
#[command(name = "patent-pipeline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Pipeline configuration file (YAML)
    #[arg(short, long, global = true, default_value = "pipeline.yaml")]
    pub config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the pipeline once
    Run {
        /// Patent table location (overrides `patents.location`)
        #[arg(long)]
        patents: Option<String>,

        /// Classification dictionary location (overrides `dictionary.location`)
        #[arg(long)]
        dictionary: Option<String>,

        /// Output destination (local path or cloud URL)
        /// Supports: /path, s3://bucket/path, r2://bucket/path, gs://bucket/path, az://container/path
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate the pipeline configuration without touching storage
    Validate,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Indented JSON
    Pretty,
}
