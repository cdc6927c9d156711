//! Projection, date derivation and deduplication

use crate::classify::ExpandedRecord;
use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashSet;

/// Accepted calendar date layouts, tried in order
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// One row of the output dataset. Every value is a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FinalRecord {
    pub application_id: String,
    pub application_number: String,
    pub country: String,
    pub title: String,
    pub abstract_text: String,
    /// Category label (`IPC_Description` in the output)
    pub category: String,
    pub year: String,
    pub month: String,
    pub day: String,
}

/// Counts from one aggregation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateReport {
    pub rows_in: usize,
    pub rows_out: usize,
    pub duplicates_removed: usize,
}

/// Parse an application date.
///
/// Accepts `YYYY-MM-DD` and `YYYY/MM/DD`, optionally followed by a time part
/// separated by `T` or a space.
pub fn parse_application_date(raw: &str) -> Result<NaiveDate> {
    let value = raw.trim();
    let date_part = value
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(value);

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .ok_or_else(|| {
            Error::date_parse(
                "ApplicationDate",
                raw,
                "not a calendar date (expected YYYY-MM-DD)",
            )
        })
}

/// Normalize a year value to an integer string (`"2014.0"` → `"2014"`)
pub fn normalize_year(raw: &str) -> Result<String> {
    let value = raw.trim();
    if let Ok(year) = value.parse::<i32>() {
        return Ok(year.to_string());
    }

    match value.parse::<f64>() {
        Ok(year) if year.fract() == 0.0 && year.abs() <= f64::from(i32::MAX) => {
            Ok((year as i32).to_string())
        }
        _ => Err(Error::date_parse("Year", raw, "not an integer year")),
    }
}

/// Project expanded rows onto [`FinalRecord`] and drop exact duplicates.
///
/// The classification code is not part of the output, so codes of one record
/// that share a category collapse into a single row. Rows keep the order of
/// their first occurrence.
pub fn aggregate(records: &[ExpandedRecord]) -> Result<(Vec<FinalRecord>, AggregateReport)> {
    let mut seen = HashSet::with_capacity(records.len());
    let mut output = Vec::new();

    for row in records {
        let date = parse_application_date(&row.application_date)?;
        let record = FinalRecord {
            application_id: row.application_id.clone(),
            application_number: row.application_number.clone(),
            country: row.country.clone(),
            title: row.title.clone(),
            abstract_text: row.abstract_text.clone(),
            category: row.category.clone(),
            year: normalize_year(&row.year)?,
            month: date.month().to_string(),
            day: date.day().to_string(),
        };

        if seen.insert(record.clone()) {
            output.push(record);
        }
    }

    let report = AggregateReport {
        rows_in: records.len(),
        rows_out: output.len(),
        duplicates_removed: records.len() - output.len(),
    };

    tracing::info!(
        rows_in = report.rows_in,
        rows_out = report.rows_out,
        duplicates_removed = report.duplicates_removed,
        "Aggregated final records"
    );

    Ok((output, report))
}
