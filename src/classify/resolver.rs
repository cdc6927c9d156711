//! Code splitting, resolution and row expansion

use crate::classify::dictionary::{ClassificationDictionary, Section, UNCLASSIFIED};
use crate::clean::PatentRecord;
use serde::Serialize;

/// Separator between codes in the raw classification field
pub const CODE_DELIMITER: &str = "; ";

/// Split a raw classification field into trimmed tokens.
///
/// Empty tokens are kept so that every delimiter yields a row.
pub fn split_codes(raw: &str) -> Vec<&str> {
    raw.split(CODE_DELIMITER).map(str::trim).collect()
}

/// How a code token was mapped to a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// First character is a section letter
    Primary(Section),
    /// First section letter found by scanning the token
    Fallback(Section),
    /// Token contains no section letter
    Unresolved,
}

impl Resolution {
    pub fn section(self) -> Option<Section> {
        match self {
            Resolution::Primary(section) | Resolution::Fallback(section) => Some(section),
            Resolution::Unresolved => None,
        }
    }

    /// Category label, or [`UNCLASSIFIED`]
    pub fn label(self, dictionary: &ClassificationDictionary) -> &str {
        self.section()
            .map_or(UNCLASSIFIED, |section| dictionary.label(section))
    }
}

/// Resolve a code token to its section
pub fn resolve(token: &str) -> Resolution {
    if let Some(section) = token.chars().next().and_then(Section::from_char) {
        return Resolution::Primary(section);
    }

    token
        .chars()
        .find_map(Section::from_char)
        .map_or(Resolution::Unresolved, Resolution::Fallback)
}

/// A patent record narrowed to one classification code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedRecord {
    pub application_id: String,
    pub application_number: String,
    pub country: String,
    pub title: String,
    pub abstract_text: String,
    pub code: String,
    pub category: String,
    pub application_date: String,
    pub year: String,
}

impl ExpandedRecord {
    fn new(record: &PatentRecord, code: &str, category: &str) -> Self {
        Self {
            application_id: record.application_id.clone(),
            application_number: record.application_number.clone(),
            country: record.country.clone(),
            title: record.title.clone(),
            abstract_text: record.abstract_text.clone(),
            code: code.to_string(),
            category: category.to_string(),
            application_date: record.application_date.clone(),
            year: record.year.clone(),
        }
    }
}

/// Counts from one classification pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifyReport {
    pub records_in: usize,
    pub rows_out: usize,
    pub primary: usize,
    pub fallback: usize,
    pub unresolved: usize,
}

/// Expand records into one row per code and attach category labels
pub fn classify(
    records: &[PatentRecord],
    dictionary: &ClassificationDictionary,
) -> (Vec<ExpandedRecord>, ClassifyReport) {
    let mut report = ClassifyReport {
        records_in: records.len(),
        ..ClassifyReport::default()
    };
    let mut expanded = Vec::with_capacity(records.len());

    for record in records {
        for code in record.codes() {
            let resolution = resolve(code);
            match resolution {
                Resolution::Primary(_) => report.primary += 1,
                Resolution::Fallback(section) => {
                    report.fallback += 1;
                    tracing::debug!(
                        application_id = %record.application_id,
                        code,
                        section = %section,
                        "Resolved code by fallback scan"
                    );
                }
                Resolution::Unresolved => {
                    report.unresolved += 1;
                    tracing::warn!(
                        application_id = %record.application_id,
                        code,
                        "No section letter in classification code"
                    );
                }
            }

            expanded.push(ExpandedRecord::new(
                record,
                code,
                resolution.label(dictionary),
            ));
        }
    }

    report.rows_out = expanded.len();
    tracing::info!(
        records = report.records_in,
        rows = report.rows_out,
        fallback = report.fallback,
        unresolved = report.unresolved,
        "Classified patent records"
    );

    (expanded, report)
}
