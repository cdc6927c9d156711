//! Tests for aggregator module

use super::*;
use crate::classify::ExpandedRecord;
use crate::error::Error;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn expanded(id: &str, code: &str, category: &str, date: &str) -> ExpandedRecord {
    ExpandedRecord {
        application_id: id.to_string(),
        application_number: format!("PCT/{id}"),
        country: "WO".to_string(),
        title: "Tilt-rotor aircraft".to_string(),
        abstract_text: "An aircraft with tilting rotors.".to_string(),
        code: code.to_string(),
        category: category.to_string(),
        application_date: date.to_string(),
        year: "2014".to_string(),
    }
}

// ============================================================================
// Date Tests
// ============================================================================

#[test_case("2014-03-02", 2014, 3, 2 ; "iso date")]
#[test_case("2014/03/02", 2014, 3, 2 ; "slashes")]
#[test_case(" 2014-12-31 ", 2014, 12, 31 ; "padded")]
#[test_case("2014-03-02 00:00:00", 2014, 3, 2 ; "timestamp with space")]
#[test_case("2014-03-02T10:15:00Z", 2014, 3, 2 ; "iso timestamp")]
#[test_case("2016-02-29", 2016, 2, 29 ; "leap day")]
fn test_parse_application_date(raw: &str, year: i32, month: u32, day: u32) {
    assert_eq!(
        parse_application_date(raw).unwrap(),
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    );
}

#[test_case("2014-13-02" ; "month out of range")]
#[test_case("2015-02-29" ; "not a leap year")]
#[test_case("02.03.2014" ; "dotted")]
#[test_case("" ; "empty")]
#[test_case("yesterday" ; "text")]
fn test_parse_application_date_invalid(raw: &str) {
    match parse_application_date(raw) {
        Err(Error::DateParse { field, value, .. }) => {
            assert_eq!(field, "ApplicationDate");
            assert_eq!(value, raw);
        }
        other => panic!("Expected DateParse, got {other:?}"),
    }
}

#[test_case("2014", "2014" ; "integer")]
#[test_case(" 2014 ", "2014" ; "padded")]
#[test_case("2014.0", "2014" ; "float")]
fn test_normalize_year(raw: &str, expected: &str) {
    assert_eq!(normalize_year(raw).unwrap(), expected);
}

#[test_case("2014.5" ; "fractional")]
#[test_case("MMXIV" ; "roman")]
#[test_case("" ; "empty")]
fn test_normalize_year_invalid(raw: &str) {
    assert!(matches!(normalize_year(raw), Err(Error::DateParse { .. })));
}

// ============================================================================
// Aggregation Tests
// ============================================================================

#[test]
fn test_aggregate_collapses_codes_with_same_category() {
    let category = "Performing Operations, Transporting";
    let rows = vec![
        expanded("WO2015116015", "B64C 29/00", category, "2014-03-02"),
        expanded("WO2015116015", "B64C 31/06", category, "2014-03-02"),
        expanded("WO2015116015", "B64C 27/32", category, "2014-03-02"),
    ];

    let (records, report) = aggregate(&rows).unwrap();

    assert_eq!(
        records,
        vec![FinalRecord {
            application_id: "WO2015116015".to_string(),
            application_number: "PCT/WO2015116015".to_string(),
            country: "WO".to_string(),
            title: "Tilt-rotor aircraft".to_string(),
            abstract_text: "An aircraft with tilting rotors.".to_string(),
            category: category.to_string(),
            year: "2014".to_string(),
            month: "3".to_string(),
            day: "2".to_string(),
        }]
    );
    assert_eq!(
        report,
        AggregateReport {
            rows_in: 3,
            rows_out: 1,
            duplicates_removed: 2
        }
    );
}

#[test]
fn test_aggregate_keeps_distinct_categories() {
    let rows = vec![
        expanded("WO1", "B64C 29/00", "Performing Operations, Transporting", "2014-03-02"),
        expanded("WO1", "G06F 1/00", "Physics", "2014-03-02"),
        expanded("WO1", "G06F 3/00", "Physics", "2014-03-02"),
        expanded("WO2", "G06F 1/00", "Physics", "2014-03-02"),
    ];

    let (records, _) = aggregate(&rows).unwrap();
    let keys: Vec<(&str, &str)> = records
        .iter()
        .map(|r| (r.application_id.as_str(), r.category.as_str()))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("WO1", "Performing Operations, Transporting"),
            ("WO1", "Physics"),
            ("WO2", "Physics"),
        ]
    );
}

#[test]
fn test_aggregate_dedup_is_full_row() {
    let mut other_title = expanded("WO1", "G06F 1/00", "Physics", "2014-03-02");
    other_title.title = "A different title".to_string();

    let rows = vec![
        expanded("WO1", "G06F 1/00", "Physics", "2014-03-02"),
        other_title,
    ];

    let (records, _) = aggregate(&rows).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_aggregate_invalid_date_fails() {
    let rows = vec![
        expanded("WO1", "G06F 1/00", "Physics", "2014-03-02"),
        expanded("WO2", "G06F 1/00", "Physics", "not-a-date"),
    ];

    assert!(matches!(aggregate(&rows), Err(Error::DateParse { .. })));
}

#[test]
fn test_aggregate_empty() {
    let (records, report) = aggregate(&[]).unwrap();
    assert!(records.is_empty());
    assert_eq!(report, AggregateReport::default());
}
