// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::needless_pass_by_value)]

//! # Patent Category Pipeline
//!
//! A single-pass batch job that turns a raw patent table into a Parquet
//! dataset partitioned by IPC section category and country.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use patent_pipeline::{load_config, Pipeline, Session};
//!
//! #[tokio::main]
//! async fn main() -> patent_pipeline::Result<()> {
//!     let config = load_config("pipeline.yaml")?;
//!
//!     let session = Session::open(&config)?;
//!     let summary = Pipeline::new(config).run(&session).await;
//!     session.close();
//!
//!     println!("{:?}", summary?.status);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────┐   ┌─────────┐   ┌────────────┐   ┌────────────┐   ┌────────┐
//! │ Loader │ → │ Cleaner │ → │ Classifier │ → │ Aggregator │ → │ Writer │
//! └────────┘   └─────────┘   └────────────┘   └────────────┘   └────────┘
//!  CSV from     drop index,   one row per      year/month/day,  Parquet,
//!  storage      rename, drop  code, section    dedup            IPC_Description=/
//!               missing       → category                        Country=/
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the pipeline
pub mod error;

/// Pipeline configuration
pub mod config;

/// Object storage locations and the run session
pub mod storage;

/// Delimited text loading
pub mod source;

/// Column mapping and missing-value filtering
pub mod clean;

/// Classification code expansion and category lookup
pub mod classify;

/// Date derivation, projection and deduplication
pub mod aggregate;

/// Partitioned Parquet output
pub mod output;

/// Stage orchestration
pub mod pipeline;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};

pub use config::{load_config, load_config_from_str, PipelineConfig};
pub use pipeline::{Pipeline, RunStatus, RunSummary};
pub use storage::{Credentials, Session};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
