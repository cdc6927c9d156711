//! Tests for cleaner module

use super::*;
use crate::config::ColumnLayout;
use crate::error::Error;
use crate::source::RawTable;
use pretty_assertions::assert_eq;
use test_case::test_case;

const HEADERS: [&str; 10] = [
    "_c0",
    "index",
    "id",
    "number",
    "country",
    "title",
    "abstract",
    "ipc",
    "date",
    "year",
];

fn row(cells: [Option<&str>; 10]) -> Vec<Option<String>> {
    cells.iter().map(|c| c.map(str::to_string)).collect()
}

fn full_row(id: &str) -> Vec<Option<String>> {
    row([
        Some("x"),
        Some("0"),
        Some(id),
        Some("PCT/US2015/013000"),
        Some("WO"),
        Some("Tilt-rotor aircraft"),
        Some("An aircraft with tilting rotors."),
        Some("B64C 29/00; B64C 31/06"),
        Some("2014-03-02"),
        Some("2014"),
    ])
}

fn table(rows: Vec<Vec<Option<String>>>) -> RawTable {
    RawTable::new(HEADERS.iter().map(|h| (*h).to_string()).collect(), rows).unwrap()
}

// ============================================================================
// Column Resolution Tests
// ============================================================================

#[test]
fn test_resolve_columns_skips_dropped_columns() {
    let columns = resolve_columns(&table(vec![]), &ColumnLayout::default()).unwrap();
    assert_eq!(columns, [2, 3, 4, 5, 6, 7, 8, 9]);
}

#[test]
fn test_resolve_columns_dropped_columns_anywhere() {
    let headers = vec!["id", "n", "index", "c", "t", "a", "ipc", "d", "_c0", "y"];
    let table = RawTable::new(headers.into_iter().map(String::from).collect(), vec![]).unwrap();

    let columns = resolve_columns(&table, &ColumnLayout::default()).unwrap();
    assert_eq!(columns, [0, 1, 3, 4, 5, 6, 7, 9]);
}

#[test]
fn test_resolve_columns_missing_index_column() {
    let layout = ColumnLayout {
        index_column: "row_id".to_string(),
        ..ColumnLayout::default()
    };
    let err = resolve_columns(&table(vec![]), &layout).unwrap_err();
    assert!(matches!(err, Error::SchemaMismatch { .. }));
    assert!(err.to_string().contains("row_id"));
}

#[test]
fn test_resolve_columns_wrong_count() {
    let headers = vec!["_c0", "index", "id", "number"];
    let table = RawTable::new(headers.into_iter().map(String::from).collect(), vec![]).unwrap();

    let err = resolve_columns(&table, &ColumnLayout::default()).unwrap_err();
    assert!(err.to_string().contains("found 2"));
}

#[test]
fn test_resolve_columns_source_columns_must_match() {
    let mut layout = ColumnLayout::default();
    layout.source_columns = Some(
        ["id", "number", "country", "title", "abstract", "ipc", "date", "year"]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
    );
    assert!(resolve_columns(&table(vec![]), &layout).is_ok());

    layout.source_columns.as_mut().unwrap().swap(0, 1);
    let result = resolve_columns(&table(vec![]), &layout);
    assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
}

// ============================================================================
// Cleaning Tests
// ============================================================================

#[test]
fn test_clean_maps_fields_in_order() {
    let (records, report) = clean(&table(vec![full_row("WO2015116015")]), &ColumnLayout::default())
        .unwrap();

    assert_eq!(report.rows_kept, 1);
    let record = &records[0];
    assert_eq!(record.application_id, "WO2015116015");
    assert_eq!(record.application_number, "PCT/US2015/013000");
    assert_eq!(record.country, "WO");
    assert_eq!(record.title, "Tilt-rotor aircraft");
    assert_eq!(record.abstract_text, "An aircraft with tilting rotors.");
    assert_eq!(record.classification_codes, "B64C 29/00; B64C 31/06");
    assert_eq!(record.application_date, "2014-03-02");
    assert_eq!(record.year, "2014");
    assert_eq!(record.codes(), vec!["B64C 29/00", "B64C 31/06"]);
}

#[test]
fn test_clean_drops_rows_with_missing_required_fields() {
    let mut missing_title = full_row("WO2");
    missing_title[5] = None;
    let mut blank_date = full_row("WO3");
    blank_date[8] = Some("   ".to_string());
    let mut missing_extraneous = full_row("WO4");
    missing_extraneous[0] = None;

    let input = table(vec![
        full_row("WO1"),
        missing_title,
        blank_date,
        missing_extraneous,
    ]);
    let (records, report) = clean(&input, &ColumnLayout::default()).unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.application_id.as_str()).collect();
    assert_eq!(ids, vec!["WO1", "WO4"]);
    assert_eq!(
        report,
        CleanReport {
            rows_in: 4,
            rows_kept: 2,
            rows_dropped: 2
        }
    );
}

#[test_case("" ; "empty")]
#[test_case("   " ; "spaces")]
#[test_case("\t \n" ; "tab and newline")]
fn test_clean_treats_whitespace_only_cell_as_missing(blank: &str) {
    let mut blank_title = full_row("WO2");
    blank_title[5] = Some(blank.to_string());

    let input = table(vec![full_row("WO1"), blank_title, full_row("WO3")]);
    let (records, report) = clean(&input, &ColumnLayout::default()).unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.application_id.as_str()).collect();
    assert_eq!(ids, vec!["WO1", "WO3"]);
    assert_eq!(report.rows_dropped, 1);
}

#[test]
fn test_clean_leaves_input_untouched() {
    let input = table(vec![full_row("WO1"), row([None; 10])]);
    let before = input.clone();

    let (records, _) = clean(&input, &ColumnLayout::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(input, before);
}

#[test]
fn test_clean_output_has_no_missing_values() {
    let mut rows = Vec::new();
    for i in 0..10 {
        let mut r = full_row(&format!("WO{i}"));
        if i % 3 == 0 {
            r[2 + i % 8] = None;
        }
        rows.push(r);
    }

    let (records, report) = clean(&table(rows), &ColumnLayout::default()).unwrap();
    assert!(report.rows_kept <= report.rows_in);
    for record in &records {
        for value in [
            &record.application_id,
            &record.application_number,
            &record.country,
            &record.title,
            &record.abstract_text,
            &record.classification_codes,
            &record.application_date,
            &record.year,
        ] {
            assert!(!value.trim().is_empty());
        }
    }
}
