use super::*;
use crate::dataset::{Record, Value, ValueKind};
use crate::generator::fields;
use arrow::datatypes::{DataType, TimeUnit};
use chrono::{TimeZone, Utc};

#[test]
fn test_schema_creation() {
    let schema = create_userdata_schema();
    assert_eq!(schema.len(), 14);

    let names: Vec<_> = schema.names().collect();
    assert_eq!(names, fields::FIELD_ORDER.to_vec());

    assert_eq!(schema.field(fields::COMPANY).unwrap().wire_type(), WireType::Utf8);
    assert_eq!(
        schema.field(fields::CREATED_AT).unwrap().wire_type(),
        WireType::TimestampMillis
    );
    assert_eq!(schema.field(fields::ACTIVATED).unwrap().wire_type(), WireType::Boolean);
    assert!(schema.field("Routing Number").is_none());
}

#[test]
fn test_arrow_schema_keeps_literal_names() {
    let arrow_schema = create_userdata_schema().to_arrow();

    let routing = arrow_schema.field_with_name(fields::ROUTING_NUMBER).unwrap();
    assert_eq!(routing.data_type(), &DataType::Int64);
    assert!(!routing.is_nullable());
    assert!(routing.metadata().contains_key(KEY_DESCRIPTION));

    let created = arrow_schema.field_with_name(fields::CREATED_AT).unwrap();
    assert_eq!(
        created.data_type(),
        &DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into()))
    );

    assert_eq!(arrow_schema.field(9).name(), "Company\t");
    assert_eq!(
        arrow_schema.metadata().get(KEY_FORMAT_VERSION).map(String::as_str),
        Some(USERDATA_FORMAT_VERSION)
    );
}

#[test]
fn test_parse_decimal_digits() {
    assert_eq!(parse_decimal_digits("123456789"), Ok(123_456_789));
    assert_eq!(parse_decimal_digits("011000015"), Ok(11_000_015));
    assert_eq!(parse_decimal_digits("000"), Ok(0));
    assert_eq!(parse_decimal_digits("9223372036854775807"), Ok(i64::MAX));

    assert!(matches!(
        parse_decimal_digits("9223372036854775808"),
        Err(CoercionError::Overflow(_))
    ));
    for bad in ["", " 123", "12 3", "-1", "+1", "12a", "1_000", "１２"] {
        assert!(
            matches!(parse_decimal_digits(bad), Err(CoercionError::NotDigits(_))),
            "{:?} should be rejected",
            bad
        );
    }
}

#[test]
fn test_coerce() {
    let ts = Utc.with_ymd_and_hms(2023, 5, 6, 7, 8, 9).unwrap();

    assert_eq!(
        coerce(WireType::Int64, &Value::from("021000021")),
        Ok(Coerced::Int64(21_000_021))
    );
    assert_eq!(coerce(WireType::Int64, &Value::Integer(-3)), Ok(Coerced::Int64(-3)));
    assert_eq!(
        coerce(WireType::TimestampMillis, &Value::Timestamp(ts)),
        Ok(Coerced::TimestampMillis(ts.timestamp_millis()))
    );
    assert_eq!(
        coerce(WireType::Boolean, &Value::Boolean(true)),
        Ok(Coerced::Boolean(true))
    );
    assert_eq!(
        coerce(WireType::Utf8, &Value::Integer(7)),
        Ok(Coerced::Utf8("7".into()))
    );

    assert_eq!(
        coerce(WireType::Boolean, &Value::from("true")),
        Err(CoercionError::KindMismatch {
            expected: WireType::Boolean,
            found: ValueKind::Text,
        })
    );
    assert!(coerce(WireType::TimestampMillis, &Value::Integer(0)).is_err());
}

#[test]
fn test_coerce_record_reports_missing_field() {
    let schema = Schema::new(vec![
        SchemaField::new("Name", WireType::Utf8),
        SchemaField::new("Routing", WireType::Int64),
    ]);
    let record = Record::new().field("Name", "Alice");

    assert_eq!(
        coerce_record(&schema, 4, &record),
        Err(SchemaMismatch::MissingField {
            record: 4,
            field: "Routing".to_string(),
        })
    );
}

#[test]
fn test_coerce_record_reports_bad_value() {
    let schema = Schema::new(vec![SchemaField::new("Routing", WireType::Int64)]);
    let record = Record::new().field("Routing", "12-34");

    let err = coerce_record(&schema, 0, &record).unwrap_err();
    assert!(matches!(
        err,
        SchemaMismatch::NotCoercible {
            record: 0,
            wire_type: WireType::Int64,
            source: CoercionError::NotDigits(_),
            ..
        }
    ));
    assert!(err.to_string().contains("Routing"));
}

#[test]
fn test_validate_field_order() {
    let schema = Schema::new(vec![
        SchemaField::new("A", WireType::Utf8),
        SchemaField::new("B", WireType::Utf8),
    ]);

    assert!(validate_field_order(&schema, &["A".to_string(), "B".to_string()]).is_ok());
    assert!(validate_field_order(&schema, &["B".to_string(), "A".to_string()]).is_err());
    assert!(validate_field_order(&schema, &["A".to_string()]).is_err());
    assert!(validate_field_order(&schema, &["A ".to_string(), "B".to_string()]).is_err());
}

#[test]
fn test_schema_serializes_for_footer() {
    let schema = Schema::new(vec![SchemaField::new("Created At ", WireType::TimestampMillis)]);
    assert_eq!(
        serde_json::to_string(&schema).unwrap(),
        r#"{"fields":[{"name":"Created At ","wire_type":"timestamp_millis"}]}"#
    );
}
