//! Aggregator module
//!
//! Projects expanded rows onto the final column set, derives date parts and
//! removes exact duplicates.

mod aggregator;

pub use aggregator::{
    aggregate, normalize_year, parse_application_date, AggregateReport, FinalRecord,
};

#[cfg(test)]
mod tests;
