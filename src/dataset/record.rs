use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::value::Value;

/// One row of the dataset: an ordered mapping from field name to value.
///
/// Field order is insertion order and is what every encoder emits. Names are
/// kept byte-for-byte, including surrounding whitespace and tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with room for `capacity` fields
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: Vec::with_capacity(capacity),
        }
    }

    /// Append a field (builder style)
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Append a field
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Look up a value by its literal field name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Field names in record order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Values in record order
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.fields.iter().map(|(_, value)| value)
    }

    /// `(name, value)` pairs in record order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// Serialized as a map in field order; never routed through a sorted map.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_is_insertion_order() {
        let record = Record::new()
            .field("Zeta", "z")
            .field(" Name ", "Alice")
            .field("Age", 30i64);

        let names: Vec<_> = record.field_names().collect();
        assert_eq!(names, vec!["Zeta", " Name ", "Age"]);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"Zeta":"z"," Name ":"Alice","Age":30}"#
        );
    }

    #[test]
    fn test_lookup_is_literal() {
        let record = Record::new().field("Company\t", "Acme");
        assert_eq!(record.get("Company\t"), Some(&Value::from("Acme")));
        assert_eq!(record.get("Company"), None);
    }
}
