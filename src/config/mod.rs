//! Pipeline configuration
//!
//! Parse pipeline definitions from YAML files.
//!
//! # Overview
//!
//! The config module provides:
//! - `PipelineConfig` - Source, dictionary and output locations
//! - `ColumnLayout` - Validated mapping of raw patent columns onto canonical fields
//! - `CsvOptions` / `ParquetOptions` - Format settings for input and output
//! - YAML parsing with validation

mod parser;
mod types;

pub use parser::{load_config, load_config_from_str, validate_config};
pub use types::{
    ColumnLayout, CredentialsDefinition, CsvOptions, OutputDefinition, ParquetCompression,
    ParquetOptions, PipelineConfig, SourceDefinition, PATENT_FIELDS,
};
