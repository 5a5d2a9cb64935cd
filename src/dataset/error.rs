use super::value::ValueKind;

/// Errors raised when assembling a [`Dataset`](super::Dataset)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatasetError {
    /// A field name is declared twice
    #[error("Duplicate field name: {0:?}")]
    DuplicateField(String),

    /// A record's field names or order differ from the declared field list
    #[error("Record {index} has fields {found:?}, expected {expected:?}")]
    FieldMismatch {
        /// Position of the offending record
        index: usize,
        /// Declared field names
        expected: Vec<String>,
        /// Field names found in the record
        found: Vec<String>,
    },

    /// A field holds a different kind of value than in the first record
    #[error("Record {index}, field {field:?}: expected {expected} value, found {found}")]
    KindMismatch {
        /// Position of the offending record
        index: usize,
        /// Literal field name
        field: String,
        /// Kind established by the first record
        expected: ValueKind,
        /// Kind found in this record
        found: ValueKind,
    },

    /// No records to infer a field list from
    #[error("Cannot infer field names from an empty record list")]
    Empty,
}
