//! # Dataset Module
//!
//! The in-memory record set shared by every encoder.
//!
//! A [`Dataset`] is built once per run, validated for structural homogeneity
//! (same field names in the same order, same value kind per field), and is
//! immutable afterwards. Cloning is cheap: records live behind an `Arc`, so
//! encoders running on other threads share one snapshot without locking.
//!
//! ```rust
//! use userdata_fixtures::dataset::{Dataset, Record};
//!
//! let dataset = Dataset::from_records(vec![
//!     Record::new().field("Name", "Alice").field("Age", 30i64),
//!     Record::new().field("Name", "Bob").field("Age", 25i64),
//! ])?;
//!
//! assert_eq!(dataset.len(), 2);
//! assert_eq!(dataset.field_names(), &["Name".to_string(), "Age".to_string()]);
//! # Ok::<(), userdata_fixtures::dataset::DatasetError>(())
//! ```

mod error;
mod record;
mod value;

#[cfg(test)]
mod tests;

use std::collections::HashSet;
use std::sync::Arc;

pub use error::DatasetError;
pub use record::Record;
pub use value::{format_timestamp, Value, ValueKind};

/// Immutable, ordered collection of homogeneous records
#[derive(Debug, Clone)]
pub struct Dataset {
    field_names: Arc<[String]>,
    records: Arc<[Record]>,
}

impl Dataset {
    /// Build a dataset from a declared field list and its records.
    ///
    /// Every record must carry exactly `field_names`, in order, and each field
    /// must hold the same [`ValueKind`] in every record.
    pub fn new(field_names: Vec<String>, records: Vec<Record>) -> Result<Self, DatasetError> {
        let mut seen = HashSet::with_capacity(field_names.len());
        for name in &field_names {
            if !seen.insert(name.as_str()) {
                return Err(DatasetError::DuplicateField(name.clone()));
            }
        }

        let mut kinds: Option<Vec<ValueKind>> = None;
        for (index, record) in records.iter().enumerate() {
            if !record.field_names().eq(field_names.iter().map(String::as_str)) {
                return Err(DatasetError::FieldMismatch {
                    index,
                    expected: field_names.clone(),
                    found: record.field_names().map(str::to_string).collect(),
                });
            }

            match &kinds {
                None => kinds = Some(record.values().map(Value::kind).collect()),
                Some(expected) => {
                    for ((name, value), kind) in record.iter().zip(expected) {
                        if value.kind() != *kind {
                            return Err(DatasetError::KindMismatch {
                                index,
                                field: name.to_string(),
                                expected: *kind,
                                found: value.kind(),
                            });
                        }
                    }
                }
            }
        }

        Ok(Self {
            field_names: field_names.into(),
            records: records.into(),
        })
    }

    /// Build a dataset whose field list is taken from the first record
    pub fn from_records(records: Vec<Record>) -> Result<Self, DatasetError> {
        let first = records.first().ok_or(DatasetError::Empty)?;
        let field_names = first.field_names().map(str::to_string).collect();
        Self::new(field_names, records)
    }

    /// Declared field names, in output order
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// All records, in generation order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Iterate over records in generation order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
