//! In-memory delimited text table

use crate::config::CsvOptions;
use crate::error::{Error, Result};
use csv::ReaderBuilder;
use std::io::Read;

/// A delimited text table held in memory.
///
/// Column order follows the header row. Empty cells are stored as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column names from the header row
    headers: Vec<String>,
    /// Data rows, one cell per header
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Create a table, checking every row has one cell per header
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        if let Some((line, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(Error::schema_mismatch(format!(
                "row {} has {} cells, header has {}",
                line + 1,
                row.len(),
                headers.len()
            )));
        }
        Ok(Self { headers, rows })
    }

    /// Parse delimited text with a header row
    pub fn from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(options.delimiter as u8)
            .quote(options.quote as u8)
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            let row = record
                .iter()
                .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.headers.len()
    }

    /// Position of a column by header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
