//! Configuration types for pipeline definitions
//!
//! All structures deserialize from the YAML pipeline file.

use serde::{Deserialize, Serialize};

/// Canonical patent field names, in the order raw columns are mapped onto them
pub const PATENT_FIELDS: [&str; 8] = [
    "ApplicationId",
    "ApplicationNumber",
    "Country",
    "Title",
    "Abstract",
    "ClassificationCodes",
    "ApplicationDate",
    "Year",
];

// ============================================================================
// Top-Level Pipeline Config
// ============================================================================

/// Complete pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name (used in logs and the run summary)
    #[serde(default = "default_name")]
    pub name: String,

    /// Patent records source (input A)
    pub patents: SourceDefinition,

    /// Classification dictionary source (input B).
    /// When absent the built-in IPC section labels are used.
    #[serde(default)]
    pub dictionary: Option<SourceDefinition>,

    /// Partitioned output destination
    pub output: OutputDefinition,

    /// Raw patent column layout
    #[serde(default)]
    pub layout: ColumnLayout,

    /// Where storage credentials are read from
    #[serde(default)]
    pub credentials: CredentialsDefinition,
}

fn default_name() -> String {
    "patent-categories".to_string()
}

impl PipelineConfig {
    /// Every storage location this pipeline touches
    pub fn locations(&self) -> Vec<&str> {
        let mut locations = vec![self.patents.location.as_str()];
        if let Some(dictionary) = &self.dictionary {
            locations.push(dictionary.location.as_str());
        }
        locations.push(self.output.location.as_str());
        locations
    }
}

// ============================================================================
// Sources
// ============================================================================

/// A delimited text table in storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDefinition {
    /// Storage URL or local path
    pub location: String,

    /// Delimited text settings
    #[serde(default)]
    pub csv: CsvOptions,
}

/// Delimited text settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Field delimiter (default: comma)
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Quote character (default: double quote)
    #[serde(default = "default_quote")]
    pub quote: char,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
            quote: default_quote(),
        }
    }
}

impl CsvOptions {
    /// Create options with a custom delimiter
    pub fn with_delimiter(delimiter: char) -> Self {
        Self {
            delimiter,
            ..Self::default()
        }
    }
}

fn default_delimiter() -> char {
    ','
}

fn default_quote() -> char {
    '"'
}

// ============================================================================
// Column Layout
// ============================================================================

/// Layout of the raw patent table.
///
/// The raw table carries one extraneous column and one index column. Both are
/// dropped, and the remaining columns map in order onto [`PATENT_FIELDS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    /// Header of the extraneous column
    #[serde(default = "default_extraneous_column")]
    pub extraneous_column: String,

    /// Header of the index column
    #[serde(default = "default_index_column")]
    pub index_column: String,

    /// Expected raw headers of the remaining columns, in order.
    /// When set, the raw table must match exactly.
    #[serde(default)]
    pub source_columns: Option<Vec<String>>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            extraneous_column: default_extraneous_column(),
            index_column: default_index_column(),
            source_columns: None,
        }
    }
}

fn default_extraneous_column() -> String {
    "_c0".to_string()
}

fn default_index_column() -> String {
    "index".to_string()
}

// ============================================================================
// Output
// ============================================================================

/// Partitioned Parquet destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputDefinition {
    /// Storage URL or local directory
    pub location: String,

    /// Parquet writer settings
    #[serde(default)]
    pub parquet: ParquetOptions,
}

/// Parquet compression codec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParquetCompression {
    /// Snappy (default)
    #[default]
    Snappy,
    /// Zstandard
    Zstd,
    /// Gzip
    Gzip,
    /// No compression
    None,
}

/// Parquet writer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParquetOptions {
    #[serde(default)]
    pub compression: ParquetCompression,

    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,

    #[serde(default = "default_true")]
    pub dictionary: bool,

    #[serde(default = "default_true")]
    pub statistics: bool,
}

impl Default for ParquetOptions {
    fn default() -> Self {
        Self {
            compression: ParquetCompression::default(),
            row_group_size: default_row_group_size(),
            dictionary: true,
            statistics: true,
        }
    }
}

fn default_row_group_size() -> usize {
    1024 * 1024
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Credentials
// ============================================================================

/// Names of the environment variables holding storage credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialsDefinition {
    #[serde(default = "default_access_key_env")]
    pub access_key_id_env: String,

    #[serde(default = "default_secret_key_env")]
    pub secret_access_key_env: String,
}

impl Default for CredentialsDefinition {
    fn default() -> Self {
        Self {
            access_key_id_env: default_access_key_env(),
            secret_access_key_env: default_secret_key_env(),
        }
    }
}

fn default_access_key_env() -> String {
    "AWS_ACCESS_KEY_ID".to_string()
}

fn default_secret_key_env() -> String {
    "AWS_SECRET_ACCESS_KEY".to_string()
}
