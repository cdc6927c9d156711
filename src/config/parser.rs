//! YAML parser for pipeline definitions
//!
//! Parses and validates pipeline YAML files.

use crate::config::types::{ColumnLayout, CsvOptions, PipelineConfig, PATENT_FIELDS};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Load a pipeline configuration from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read pipeline file '{}': {e}",
            path.display()
        ))
    })?;
    load_config_from_str(&content)
}

/// Load a pipeline configuration from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig = serde_yaml::from_str(yaml)?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate a pipeline configuration
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    if config.name.trim().is_empty() {
        return Err(Error::config("Pipeline name cannot be empty"));
    }

    if config.patents.location.trim().is_empty() {
        return Err(Error::config("patents.location cannot be empty"));
    }
    validate_csv("patents.csv", &config.patents.csv)?;

    if let Some(dictionary) = &config.dictionary {
        if dictionary.location.trim().is_empty() {
            return Err(Error::config("dictionary.location cannot be empty"));
        }
        validate_csv("dictionary.csv", &dictionary.csv)?;
    }

    if config.output.location.trim().is_empty() {
        return Err(Error::config("output.location cannot be empty"));
    }
    if config.output.parquet.row_group_size == 0 {
        return Err(Error::config("output.parquet.row_group_size must be positive"));
    }

    validate_layout(&config.layout)?;

    Ok(())
}

/// Validate delimiter and quote characters
fn validate_csv(field: &str, options: &CsvOptions) -> Result<()> {
    if !options.delimiter.is_ascii() || !options.quote.is_ascii() {
        return Err(Error::config(format!(
            "{field}: delimiter and quote must be ASCII characters"
        )));
    }
    if options.delimiter == options.quote {
        return Err(Error::config(format!(
            "{field}: delimiter and quote cannot be the same character"
        )));
    }
    Ok(())
}

/// Validate the raw column layout
fn validate_layout(layout: &ColumnLayout) -> Result<()> {
    if layout.extraneous_column == layout.index_column {
        return Err(Error::config(format!(
            "layout: extraneous and index column are both '{}'",
            layout.index_column
        )));
    }

    if let Some(columns) = &layout.source_columns {
        if columns.len() != PATENT_FIELDS.len() {
            return Err(Error::config(format!(
                "layout.source_columns lists {} columns, expected {}",
                columns.len(),
                PATENT_FIELDS.len()
            )));
        }
        let unique: std::collections::HashSet<_> = columns.iter().collect();
        if unique.len() != columns.len() {
            return Err(Error::config("layout.source_columns contains duplicates"));
        }
    }

    Ok(())
}
