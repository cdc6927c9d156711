//! Arrow schema for output files
//!
//! Partition columns (`IPC_Description`, `Country`) live in the directory
//! path, so each file only stores the remaining columns.

use crate::aggregate::FinalRecord;
use crate::error::{Error, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use std::sync::Arc;

const APPLICATION_ID: &str = "ApplicationId";
const APPLICATION_NUMBER: &str = "ApplicationNumber";
const TITLE: &str = "Title";
const ABSTRACT: &str = "Abstract";
const YEAR: &str = "year";
const MONTH: &str = "month";
const DAY: &str = "day";

/// Schema of every Parquet file in the dataset
pub fn file_schema() -> SchemaRef {
    Arc::new(Schema::new(
        [
            APPLICATION_ID,
            APPLICATION_NUMBER,
            TITLE,
            ABSTRACT,
            YEAR,
            MONTH,
            DAY,
        ]
        .map(|name| Field::new(name, DataType::Utf8, false))
        .to_vec(),
    ))
}

/// Build one RecordBatch from records sharing a partition
pub fn records_to_batch(records: &[&FinalRecord]) -> Result<RecordBatch> {
    let columns = vec![
        string_column(records, |r| &r.application_id),
        string_column(records, |r| &r.application_number),
        string_column(records, |r| &r.title),
        string_column(records, |r| &r.abstract_text),
        string_column(records, |r| &r.year),
        string_column(records, |r| &r.month),
        string_column(records, |r| &r.day),
    ];

    Ok(RecordBatch::try_new(file_schema(), columns)?)
}

fn string_column<'a, F>(records: &[&'a FinalRecord], value: F) -> ArrayRef
where
    F: Fn(&'a FinalRecord) -> &'a str,
{
    Arc::new(
        records
            .iter()
            .map(|r| Some(value(*r)))
            .collect::<StringArray>(),
    )
}

/// Rebuild records from a batch read out of one partition
pub fn batch_to_records(
    batch: &RecordBatch,
    category: &str,
    country: &str,
) -> Result<Vec<FinalRecord>> {
    let application_id = col_string(batch, APPLICATION_ID)?;
    let application_number = col_string(batch, APPLICATION_NUMBER)?;
    let title = col_string(batch, TITLE)?;
    let abstract_text = col_string(batch, ABSTRACT)?;
    let year = col_string(batch, YEAR)?;
    let month = col_string(batch, MONTH)?;
    let day = col_string(batch, DAY)?;

    Ok((0..batch.num_rows())
        .map(|i| FinalRecord {
            application_id: application_id.value(i).to_string(),
            application_number: application_number.value(i).to_string(),
            country: country.to_string(),
            title: title.value(i).to_string(),
            abstract_text: abstract_text.value(i).to_string(),
            category: category.to_string(),
            year: year.value(i).to_string(),
            month: month.value(i).to_string(),
            day: day.value(i).to_string(),
        })
        .collect())
}

fn col_string<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    let idx = batch
        .schema()
        .index_of(name)
        .map_err(|e| Error::output(format!("missing column '{name}': {e}")))?;
    batch
        .column(idx)
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| Error::output(format!("column '{name}' is not StringArray")))
}
