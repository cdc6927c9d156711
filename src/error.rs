//! Error types for the patent pipeline
//!
//! This module defines the error hierarchy for every pipeline stage.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the pipeline
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing credential: environment variable '{variable}' is not set")]
    MissingCredentials { variable: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Source Errors
    // ============================================================================
    #[error("Source unavailable at '{location}': {message}")]
    SourceUnavailable { location: String, message: String },

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Schema mismatch: {message}")]
    SchemaMismatch { message: String },

    // ============================================================================
    // Transformation Errors
    // ============================================================================
    #[error("Classification dictionary integrity error: {message}")]
    Integrity { message: String },

    #[error("Invalid {field} '{value}': {message}")]
    DateParse {
        field: String,
        value: String,
        message: String,
    },

    // ============================================================================
    // Arrow/Parquet/Storage Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("Output error: {message}")]
    Output { message: String },

    #[error("Write to '{destination}' failed: {message}")]
    WriteFailure {
        destination: String,
        message: String,
    },

}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing credentials error
    pub fn missing_credentials(variable: impl Into<String>) -> Self {
        Self::MissingCredentials {
            variable: variable.into(),
        }
    }

    /// Create a source unavailable error
    pub fn source_unavailable(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            message: message.into(),
        }
    }

    /// Create a schema mismatch error
    pub fn schema_mismatch(message: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            message: message.into(),
        }
    }

    /// Create a dictionary integrity error
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
        }
    }

    /// Create a date parse error
    pub fn date_parse(
        field: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::DateParse {
            field: field.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Create a write failure error
    pub fn write_failure(destination: impl Into<String>, message: impl Into<String>) -> Self {
        Self::WriteFailure {
            destination: destination.into(),
            message: message.into(),
        }
    }

    /// Whether this error must abort the run.
    ///
    /// Write failures are logged and end the run quietly, everything else is fatal.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::WriteFailure { .. })
    }
}

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, Error>;
