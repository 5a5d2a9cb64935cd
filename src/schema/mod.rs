//! # Typed Schema Definition
//!
//! The explicit schema used by the Parquet encoder. It is declared once,
//! independently of record contents, and is the authority for type coercion
//! in that encoder.
//!
//! ## Fixture Columns
//!
//! | Column | Wire type | Generated as |
//! |--------|-----------|--------------|
//! | `" Name "` | Utf8 | text |
//! | `"Phone Number "` | Utf8 | text |
//! | `"Email"` | Utf8 | text |
//! | `"Street"` | Utf8 | text |
//! | `"    City "` | Utf8 | text |
//! | `"State"` | Utf8 | text |
//! | `"Zip Code "` | Utf8 | text |
//! | `"Routing Number   "` | Int64 | text (digits, parsed) |
//! | `"Department"` | Utf8 | text |
//! | `"Company\t"` | Utf8 | text |
//! | `"Created At "` | Timestamp(ms, UTC) | timestamp |
//! | `"Profile Photo"` | Utf8 | text |
//! | `"  Description"` | Utf8 | text |
//! | `"Activated"` | Boolean | boolean |
//!
//! ## Coercion
//!
//! [`coerce`] maps a [`Value`](crate::dataset::Value) onto a [`WireType`]:
//! anything becomes Utf8 through its canonical text; Int64 accepts integers
//! and non-empty ASCII digit strings (leading zeros dropped, overflow
//! rejected); Boolean and TimestampMillis accept only their own kind.

mod builders;
mod constants;
mod validation;

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, TimeUnit};
use serde::Serialize;

pub use builders::create_userdata_schema;
pub use constants::*;
pub use validation::{
    coerce, coerce_record, parse_decimal_digits, validate_field_order, Coerced, CoercionError,
    SchemaMismatch,
};

/// Primitive type a column is written with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WireType {
    /// UTF-8 byte string
    Utf8,
    /// Signed 64-bit integer
    Int64,
    /// Boolean
    Boolean,
    /// Milliseconds since the Unix epoch, UTC
    TimestampMillis,
}

impl WireType {
    /// Arrow data type for this wire type
    pub fn to_arrow(&self) -> DataType {
        match self {
            WireType::Utf8 => DataType::Utf8,
            WireType::Int64 => DataType::Int64,
            WireType::Boolean => DataType::Boolean,
            WireType::TimestampMillis => {
                DataType::Timestamp(TimeUnit::Millisecond, Some("UTC".into()))
            }
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireType::Utf8 => write!(f, "UTF8"),
            WireType::Int64 => write!(f, "INT64"),
            WireType::Boolean => write!(f, "BOOLEAN"),
            WireType::TimestampMillis => write!(f, "TIMESTAMP_MILLIS"),
        }
    }
}

/// One declared column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    name: String,
    wire_type: WireType,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl SchemaField {
    /// Declare a column by its literal name
    pub fn new(name: impl Into<String>, wire_type: WireType) -> Self {
        Self {
            name: name.into(),
            wire_type,
            description: None,
        }
    }

    /// Attach a description, stored as Arrow field metadata
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Literal column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared wire type
    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Arrow field for this column; never nullable
    pub fn to_arrow(&self) -> Field {
        let field = Field::new(self.name.as_str(), self.wire_type.to_arrow(), false);
        match &self.description {
            Some(description) => field.with_metadata(HashMap::from([(
                KEY_DESCRIPTION.to_string(),
                description.clone(),
            )])),
            None => field,
        }
    }
}

/// Ordered mapping from field name to wire type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<SchemaField>,
}

impl Schema {
    /// Create a schema from its ordered columns
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    /// Columns in declared order
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    /// Look up a column by literal name
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Column names in declared order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no columns are declared
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Equivalent Arrow schema, tagged with the fixture format version
    pub fn to_arrow(&self) -> arrow::datatypes::Schema {
        let fields: Vec<Field> = self.fields.iter().map(SchemaField::to_arrow).collect();
        let metadata = HashMap::from([(
            KEY_FORMAT_VERSION.to_string(),
            USERDATA_FORMAT_VERSION.to_string(),
        )]);
        arrow::datatypes::Schema::new(fields).with_metadata(metadata)
    }

    /// Returns an Arc-wrapped Arrow schema for shared ownership
    pub fn to_arrow_arc(&self) -> Arc<arrow::datatypes::Schema> {
        Arc::new(self.to_arrow())
    }
}
