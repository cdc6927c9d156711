//! Column mapping and missing-value filtering

use crate::clean::types::{CleanReport, PatentRecord};
use crate::config::{ColumnLayout, PATENT_FIELDS};
use crate::error::{Error, Result};
use crate::source::RawTable;

/// Map raw columns onto the canonical patent fields.
///
/// Returns, for each entry of [`PATENT_FIELDS`], the index of the raw column
/// holding it. Fails when the layout's dropped columns are absent, when the
/// remaining column count is not exactly eight, or when the remaining headers
/// differ from `layout.source_columns`.
pub fn resolve_columns(table: &RawTable, layout: &ColumnLayout) -> Result<[usize; 8]> {
    let headers = table.headers();

    for dropped in [&layout.extraneous_column, &layout.index_column] {
        if table.column_index(dropped).is_none() {
            return Err(Error::schema_mismatch(format!(
                "column '{dropped}' not found in patent table (headers: {})",
                headers.join(", ")
            )));
        }
    }

    let remaining: Vec<usize> = (0..headers.len())
        .filter(|&i| headers[i] != layout.extraneous_column && headers[i] != layout.index_column)
        .collect();

    let columns: [usize; 8] = remaining.as_slice().try_into().map_err(|_| {
        Error::schema_mismatch(format!(
            "expected {} patent columns after dropping '{}' and '{}', found {}",
            PATENT_FIELDS.len(),
            layout.extraneous_column,
            layout.index_column,
            remaining.len()
        ))
    })?;

    if let Some(expected) = &layout.source_columns {
        let actual: Vec<&str> = columns.iter().map(|&i| headers[i].as_str()).collect();
        if actual != *expected {
            return Err(Error::schema_mismatch(format!(
                "patent columns [{}] do not match expected [{}]",
                actual.join(", "),
                expected.join(", ")
            )));
        }
    }

    Ok(columns)
}

/// Clean the raw patent table.
///
/// The input table is left untouched. Rows with a missing or blank value in
/// any canonical field are dropped; kept values are copied as-is.
pub fn clean(
    table: &RawTable,
    layout: &ColumnLayout,
) -> Result<(Vec<PatentRecord>, CleanReport)> {
    let columns = resolve_columns(table, layout)?;

    let records: Vec<PatentRecord> = table
        .rows()
        .iter()
        .filter_map(|row| build_record(row, &columns))
        .collect();

    let report = CleanReport {
        rows_in: table.num_rows(),
        rows_kept: records.len(),
        rows_dropped: table.num_rows() - records.len(),
    };

    tracing::info!(
        rows_in = report.rows_in,
        rows_kept = report.rows_kept,
        rows_dropped = report.rows_dropped,
        "Cleaned patent table"
    );

    Ok((records, report))
}

/// Build a record from one raw row, or `None` if any field is missing
fn build_record(row: &[Option<String>], columns: &[usize; 8]) -> Option<PatentRecord> {
    let field = |n: usize| {
        row[columns[n]]
            .as_ref()
            .filter(|value| !value.trim().is_empty())
            .cloned()
    };

    Some(PatentRecord {
        application_id: field(0)?,
        application_number: field(1)?,
        country: field(2)?,
        title: field(3)?,
        abstract_text: field(4)?,
        classification_codes: field(5)?,
        application_date: field(6)?,
        year: field(7)?,
    })
}
