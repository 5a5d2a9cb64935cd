use super::*;
use chrono::{TimeZone, Utc};

fn person(name: &str, age: i64) -> Record {
    Record::new().field("Name", name).field("Age", age)
}

#[test]
fn test_from_records_keeps_order() {
    let dataset =
        Dataset::from_records(vec![person("Alice", 30), person("Bob", 25), person("Carol", 40)])
            .unwrap();

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.field_names(), &["Name".to_string(), "Age".to_string()]);

    let names: Vec<_> = dataset
        .iter()
        .map(|r| r.get("Name").unwrap().to_text().into_owned())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn test_empty_dataset_with_declared_fields() {
    let dataset = Dataset::new(vec!["Name".to_string()], Vec::new()).unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.field_names().len(), 1);
}

#[test]
fn test_from_records_requires_a_record() {
    assert_eq!(Dataset::from_records(Vec::new()).unwrap_err(), DatasetError::Empty);
}

#[test]
fn test_field_order_mismatch() {
    let swapped = Record::new().field("Age", 25i64).field("Name", "Bob");
    let err = Dataset::from_records(vec![person("Alice", 30), swapped]).unwrap_err();

    assert!(matches!(err, DatasetError::FieldMismatch { index: 1, .. }));
}

#[test]
fn test_whitespace_is_significant_in_field_names() {
    let padded = Record::new().field(" Name ", "Bob").field("Age", 25i64);
    let err = Dataset::from_records(vec![person("Alice", 30), padded]).unwrap_err();

    assert!(matches!(err, DatasetError::FieldMismatch { index: 1, .. }));
}

#[test]
fn test_kind_mismatch() {
    let wrong = Record::new().field("Name", "Bob").field("Age", "twenty-five");
    let err = Dataset::from_records(vec![person("Alice", 30), wrong]).unwrap_err();

    assert_eq!(
        err,
        DatasetError::KindMismatch {
            index: 1,
            field: "Age".to_string(),
            expected: ValueKind::Integer,
            found: ValueKind::Text,
        }
    );
}

#[test]
fn test_duplicate_field_names_rejected() {
    let err = Dataset::new(vec!["A".to_string(), "A".to_string()], Vec::new()).unwrap_err();
    assert_eq!(err, DatasetError::DuplicateField("A".to_string()));
}

#[test]
fn test_clone_shares_records() {
    let ts = Utc.with_ymd_and_hms(2022, 6, 1, 12, 0, 0).unwrap();
    let dataset = Dataset::from_records(vec![Record::new().field("Created", ts)]).unwrap();
    let shared = dataset.clone();

    assert!(std::ptr::eq(dataset.records(), shared.records()));
}
