//! Cleaned patent record types

use crate::classify::split_codes;
use serde::Serialize;

/// A patent record with every required field present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatentRecord {
    pub application_id: String,
    pub application_number: String,
    /// Origin code (e.g. "WO")
    pub country: String,
    pub title: String,
    pub abstract_text: String,
    /// Raw classification field, `"; "`-delimited
    pub classification_codes: String,
    /// Raw date string, parsed during aggregation
    pub application_date: String,
    pub year: String,
}

impl PatentRecord {
    /// Classification tokens in field order
    pub fn codes(&self) -> Vec<&str> {
        split_codes(&self.classification_codes)
    }
}

/// Row counts from one cleaning pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub rows_in: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
}
