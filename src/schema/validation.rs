use std::borrow::Cow;

use super::{Schema, WireType};
use crate::dataset::{Record, Value, ValueKind};

/// Why a single value could not be coerced to its wire type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    /// The value's kind has no conversion to the wire type
    #[error("expected a value convertible to {expected}, found {found}")]
    KindMismatch {
        /// Declared wire type
        expected: WireType,
        /// Kind of the offending value
        found: ValueKind,
    },

    /// Text destined for Int64 is empty or contains a non-digit
    #[error("{0:?} is not a string of ASCII digits")]
    NotDigits(String),

    /// Digit string exceeds `i64::MAX`
    #[error("{0:?} does not fit in a signed 64-bit integer")]
    Overflow(String),
}

/// A record that violates the typed schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaMismatch {
    /// A declared column is absent from the record
    #[error("Record {record} is missing field {field:?}")]
    MissingField {
        /// Position of the record in the dataset
        record: usize,
        /// Literal field name
        field: String,
    },

    /// A value cannot be coerced to its declared wire type
    #[error("Record {record}, field {field:?}: cannot coerce to {wire_type}: {source}")]
    NotCoercible {
        /// Position of the record in the dataset
        record: usize,
        /// Literal field name
        field: String,
        /// Declared wire type
        wire_type: WireType,
        /// Underlying coercion failure
        #[source]
        source: CoercionError,
    },

    /// Schema columns and dataset fields differ in names or order
    #[error("Schema fields {expected:?} do not match dataset fields {found:?}")]
    FieldOrder {
        /// Column names declared by the schema
        expected: Vec<String>,
        /// Field names carried by the dataset
        found: Vec<String>,
    },
}

/// A value in its wire representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coerced<'a> {
    /// UTF-8 text
    Utf8(Cow<'a, str>),
    /// 64-bit integer
    Int64(i64),
    /// Boolean
    Boolean(bool),
    /// Milliseconds since the Unix epoch
    TimestampMillis(i64),
}

/// Parse a non-empty run of ASCII digits as an `i64`.
///
/// Leading zeros are accepted and dropped (`"011000015"` is `11_000_015`).
/// Signs, whitespace and separators are rejected, as is anything above
/// `i64::MAX`.
pub fn parse_decimal_digits(text: &str) -> Result<i64, CoercionError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CoercionError::NotDigits(text.to_string()));
    }
    text.parse::<i64>()
        .map_err(|_| CoercionError::Overflow(text.to_string()))
}

/// Coerce one value to a wire type
pub fn coerce(wire_type: WireType, value: &Value) -> Result<Coerced<'_>, CoercionError> {
    let mismatch = || CoercionError::KindMismatch {
        expected: wire_type,
        found: value.kind(),
    };

    match (wire_type, value) {
        (WireType::Utf8, value) => Ok(Coerced::Utf8(value.to_text())),
        (WireType::Int64, Value::Integer(i)) => Ok(Coerced::Int64(*i)),
        (WireType::Int64, Value::Text(s)) => parse_decimal_digits(s).map(Coerced::Int64),
        (WireType::Boolean, Value::Boolean(b)) => Ok(Coerced::Boolean(*b)),
        (WireType::TimestampMillis, Value::Timestamp(ts)) => {
            Ok(Coerced::TimestampMillis(ts.timestamp_millis()))
        }
        _ => Err(mismatch()),
    }
}

/// Coerce every declared column of a record, in schema order.
///
/// `index` is the record's position in the dataset and only feeds error
/// messages.
pub fn coerce_record<'a>(
    schema: &Schema,
    index: usize,
    record: &'a Record,
) -> Result<Vec<Coerced<'a>>, SchemaMismatch> {
    schema
        .fields()
        .iter()
        .map(|field| {
            let value = record
                .get(field.name())
                .ok_or_else(|| SchemaMismatch::MissingField {
                    record: index,
                    field: field.name().to_string(),
                })?;
            coerce(field.wire_type(), value).map_err(|source| SchemaMismatch::NotCoercible {
                record: index,
                field: field.name().to_string(),
                wire_type: field.wire_type(),
                source,
            })
        })
        .collect()
}

/// Check that the schema enumerates exactly `field_names`, in order
pub fn validate_field_order(schema: &Schema, field_names: &[String]) -> Result<(), SchemaMismatch> {
    if schema.names().eq(field_names.iter().map(String::as_str)) {
        return Ok(());
    }

    Err(SchemaMismatch::FieldOrder {
        expected: schema.names().map(str::to_string).collect(),
        found: field_names.to_vec(),
    })
}
