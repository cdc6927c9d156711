//! Cleaner module
//!
//! Turns the raw patent table into typed records.
//!
//! # Overview
//!
//! Cleaning drops the extraneous and index columns, maps the remaining columns
//! onto the canonical patent fields (validated against `ColumnLayout`), and
//! drops every row with a missing required value.

mod cleaner;
mod types;

pub use cleaner::{clean, resolve_columns};
pub use types::{CleanReport, PatentRecord};

#[cfg(test)]
mod tests;
