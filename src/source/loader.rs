//! Loading tables from storage
//!
//! Each load is a single attempt. Any failure to reach or parse a location is
//! reported as `SourceUnavailable` and ends the run.

use crate::classify::ClassificationDictionary;
use crate::config::CsvOptions;
use crate::error::{Error, Result};
use crate::source::table::RawTable;
use crate::storage::Session;

/// Read one delimited text table from a storage location
pub async fn load_table(
    session: &Session,
    location: &str,
    options: &CsvOptions,
) -> Result<RawTable> {
    let source = session.location(location)?;

    let body = source
        .read()
        .await
        .map_err(|e| Error::source_unavailable(source.url(), e.to_string()))?;

    let table = RawTable::from_reader(body.as_ref(), options)
        .map_err(|e| Error::source_unavailable(source.url(), e.to_string()))?;

    tracing::info!(
        location = %source.url(),
        scheme = %source.scheme(),
        bytes = body.len(),
        rows = table.num_rows(),
        columns = table.num_columns(),
        "Loaded table"
    );

    Ok(table)
}

/// Read the classification dictionary (Section → label)
pub async fn load_dictionary(
    session: &Session,
    location: &str,
    options: &CsvOptions,
) -> Result<ClassificationDictionary> {
    let table = load_table(session, location, options).await?;
    ClassificationDictionary::from_table(&table)
}
