//! Tests for classifier module

use super::*;
use crate::clean::PatentRecord;
use crate::error::Error;
use crate::source::RawTable;
use pretty_assertions::assert_eq;
use test_case::test_case;

fn record(id: &str, codes: &str) -> PatentRecord {
    PatentRecord {
        application_id: id.to_string(),
        application_number: format!("PCT/{id}"),
        country: "WO".to_string(),
        title: "Title".to_string(),
        abstract_text: "Abstract".to_string(),
        classification_codes: codes.to_string(),
        application_date: "2014-03-02".to_string(),
        year: "2014".to_string(),
    }
}

fn dictionary_table(rows: &[(&str, &str)]) -> RawTable {
    RawTable::new(
        vec!["Section".to_string(), "Description".to_string()],
        rows.iter()
            .map(|(k, v)| vec![Some((*k).to_string()), Some((*v).to_string())])
            .collect(),
    )
    .unwrap()
}

fn standard_rows() -> Vec<(&'static str, &'static str)> {
    Section::ALL
        .iter()
        .map(|s| match s {
            Section::A => ("A", "Human Necessities"),
            Section::B => ("B", "Performing Operations, Transporting"),
            Section::C => ("C", "Chemistry, Metallurgy"),
            Section::D => ("D", "Textiles, Paper"),
            Section::E => ("E", "Fixed Constructions"),
            Section::F => ("F", "Mechanical Engineering"),
            Section::G => ("G", "Physics"),
            Section::H => ("H", "Electricity"),
        })
        .collect()
}

// ============================================================================
// Section Tests
// ============================================================================

#[test]
fn test_section_from_char() {
    assert_eq!(Section::from_char('A'), Some(Section::A));
    assert_eq!(Section::from_char('H'), Some(Section::H));
    assert_eq!(Section::from_char('I'), None);
    assert_eq!(Section::from_char('b'), None);
    assert_eq!(Section::from_char(' '), None);
}

#[test]
fn test_section_parse() {
    assert_eq!(" G ".parse::<Section>().unwrap(), Section::G);
    assert!("GH".parse::<Section>().is_err());
    assert!("".parse::<Section>().is_err());
    assert!("Z".parse::<Section>().is_err());
}

#[test]
fn test_section_round_trips_char() {
    for section in Section::ALL {
        assert_eq!(Section::from_char(section.as_char()), Some(section));
        assert_eq!(section.to_string(), section.as_char().to_string());
    }
}

// ============================================================================
// Dictionary Tests
// ============================================================================

#[test]
fn test_dictionary_from_table_matches_standard() {
    let dictionary = ClassificationDictionary::from_table(&dictionary_table(&standard_rows()))
        .unwrap();
    assert_eq!(dictionary, ClassificationDictionary::standard());
}

#[test]
fn test_dictionary_label_column_may_come_first() {
    let table = RawTable::new(
        vec!["IPC_Description".to_string(), "Section".to_string()],
        standard_rows()
            .iter()
            .map(|(k, v)| vec![Some((*v).to_string()), Some((*k).to_string())])
            .collect(),
    )
    .unwrap();

    let dictionary = ClassificationDictionary::from_table(&table).unwrap();
    assert_eq!(dictionary.label(Section::G), "Physics");
}

#[test]
fn test_dictionary_missing_section() {
    let rows: Vec<_> = standard_rows().into_iter().filter(|(k, _)| *k != "H").collect();
    let err = ClassificationDictionary::from_table(&dictionary_table(&rows)).unwrap_err();

    assert!(matches!(err, Error::Integrity { .. }));
    assert!(err.to_string().contains("missing section(s) H"));
}

#[test]
fn test_dictionary_without_section_column() {
    let table = RawTable::new(vec!["Key".to_string(), "Label".to_string()], vec![]).unwrap();
    let result = ClassificationDictionary::from_table(&table);
    assert!(matches!(result, Err(Error::Integrity { .. })));
}

#[test]
fn test_dictionary_extra_column() {
    let table = RawTable::new(
        vec!["Section".to_string(), "Label".to_string(), "Notes".to_string()],
        vec![],
    )
    .unwrap();
    let result = ClassificationDictionary::from_table(&table);
    assert!(matches!(result, Err(Error::Integrity { .. })));
}

#[test]
fn test_dictionary_invalid_key() {
    let mut rows = standard_rows();
    rows.push(("Y", "Emerging Technologies"));
    let result = ClassificationDictionary::from_table(&dictionary_table(&rows));
    assert!(matches!(result, Err(Error::Integrity { .. })));
}

#[test]
fn test_dictionary_conflicting_duplicate() {
    let mut rows = standard_rows();
    rows.push(("G", "Optics"));
    let err = ClassificationDictionary::from_table(&dictionary_table(&rows)).unwrap_err();
    assert!(err.to_string().contains("'Physics' and 'Optics'"));
}

#[test]
fn test_dictionary_identical_duplicate_allowed() {
    let mut rows = standard_rows();
    rows.push(("G", "Physics"));
    assert!(ClassificationDictionary::from_table(&dictionary_table(&rows)).is_ok());
}

#[test]
fn test_dictionary_lookup() {
    let dictionary = ClassificationDictionary::standard();
    assert_eq!(dictionary.lookup('H'), Some("Electricity"));
    assert_eq!(dictionary.lookup('9'), None);
    assert_eq!(dictionary.iter().count(), 8);
}

// ============================================================================
// Split & Resolve Tests
// ============================================================================

#[test]
fn test_split_codes() {
    assert_eq!(
        split_codes("B64C 29/00; B64C 31/06; B64C 27/32"),
        vec!["B64C 29/00", "B64C 31/06", "B64C 27/32"]
    );
    assert_eq!(split_codes("G06F 1/00"), vec!["G06F 1/00"]);
    assert_eq!(split_codes(" H04L 9/00 ;  G06F 1/00"), vec!["H04L 9/00", "G06F 1/00"]);
    assert_eq!(split_codes("H04L 9/00;G06F 1/00"), vec!["H04L 9/00;G06F 1/00"]);
    assert_eq!(split_codes("A01B 1/00; ; H01L 21/00"), vec!["A01B 1/00", "", "H01L 21/00"]);
}

#[test_case("B64C 29/00", Resolution::Primary(Section::B) ; "primary")]
#[test_case(" G06F 1/00", Resolution::Fallback(Section::G) ; "leading space")]
#[test_case("(H01L 21/00)", Resolution::Fallback(Section::H) ; "leading parenthesis")]
#[test_case("12A", Resolution::Fallback(Section::A) ; "digits first")]
#[test_case("ZZB64C", Resolution::Fallback(Section::B) ; "first section letter wins")]
#[test_case("xyz 123", Resolution::Unresolved ; "no section letter")]
#[test_case("", Resolution::Unresolved ; "empty token")]
#[test_case("   ", Resolution::Unresolved ; "whitespace token")]
fn test_resolve(token: &str, expected: Resolution) {
    assert_eq!(resolve(token), expected);
}

#[test]
fn test_resolution_labels() {
    let dictionary = ClassificationDictionary::standard();
    assert_eq!(
        resolve("B64C 29/00").label(&dictionary),
        "Performing Operations, Transporting"
    );
    assert_eq!(resolve(" G06F 1/00").label(&dictionary), "Physics");
    assert_eq!(resolve("123").label(&dictionary), UNCLASSIFIED);
}

// ============================================================================
// Classification Tests
// ============================================================================

#[test]
fn test_classify_expands_one_row_per_code() {
    let dictionary = ClassificationDictionary::standard();
    let records = vec![record(
        "WO2015116015",
        "B64C 29/00; B64C 31/06; B64C 27/32",
    )];

    let (expanded, report) = classify(&records, &dictionary);

    assert_eq!(expanded.len(), 3);
    let codes: Vec<&str> = expanded.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["B64C 29/00", "B64C 31/06", "B64C 27/32"]);
    for row in &expanded {
        assert_eq!(row.application_id, "WO2015116015");
        assert_eq!(row.category, "Performing Operations, Transporting");
        assert_eq!(row.application_date, "2014-03-02");
    }
    assert_eq!(report.primary, 3);
    assert_eq!(report.rows_out, 3);
}

#[test]
fn test_classify_preserves_cardinality() {
    let dictionary = ClassificationDictionary::standard();
    let records = vec![
        record("WO1", "A01B 1/00"),
        record("WO2", "B64C 29/00; G06F 1/00"),
        record("WO3", "H04L 9/00; ; 999"),
        record("WO4", "C07D 1/00; C07D 2/00; C08F 1/00; D21H 1/00"),
    ];

    let expected: usize = records.iter().map(|r| r.codes().len()).sum();
    let (expanded, report) = classify(&records, &dictionary);

    assert_eq!(expanded.len(), expected);
    assert_eq!(expanded.len(), 10);
    assert_eq!(report.records_in, 4);
    assert_eq!(report.primary + report.fallback + report.unresolved, 10);
    assert_eq!(report.unresolved, 2);
}

#[test]
fn test_classify_mixed_categories() {
    let dictionary = ClassificationDictionary::standard();
    let records = vec![record("WO1", "B64C 29/00; G06F 1/00; 7E04B")];

    let (expanded, report) = classify(&records, &dictionary);
    let categories: Vec<&str> = expanded.iter().map(|r| r.category.as_str()).collect();

    assert_eq!(
        categories,
        vec![
            "Performing Operations, Transporting",
            "Physics",
            "Fixed Constructions"
        ]
    );
    assert_eq!(report.fallback, 1);
}

#[test]
fn test_classify_uses_dictionary_labels() {
    let dictionary = ClassificationDictionary::from_pairs(
        Section::ALL.map(|s| (s, format!("Section {s}"))),
    )
    .unwrap();

    let (expanded, _) = classify(&[record("WO1", "F16H 1/00")], &dictionary);
    assert_eq!(expanded[0].category, "Section F");
}
