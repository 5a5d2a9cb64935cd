use chrono::{DateTime, Utc};

use crate::dataset::{Dataset, Value};

/// Name of the single sheet in both spreadsheet containers
pub const DEFAULT_SHEET_NAME: &str = "Sheet 1";

/// One spreadsheet cell, typed the way both containers store it natively
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    /// Text cell; never reinterpreted as a number
    Text(String),
    /// Numeric cell
    Number(i64),
    /// Boolean cell
    Boolean(bool),
    /// Date-time cell
    Date(DateTime<Utc>),
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Text(s) => Cell::Text(s.clone()),
            Value::Integer(i) => Cell::Number(*i),
            Value::Boolean(b) => Cell::Boolean(*b),
            Value::Timestamp(ts) => Cell::Date(*ts),
        }
    }
}

/// Immutable grid shared by the ODS and XLSX serializers.
///
/// Row 0 holds the field names as text cells; every further row is one
/// record in field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Build the sheet for a dataset
    pub fn from_dataset(name: impl Into<String>, dataset: &Dataset) -> Self {
        let mut rows = Vec::with_capacity(dataset.len() + 1);
        rows.push(
            dataset
                .field_names()
                .iter()
                .map(|n| Cell::Text(n.clone()))
                .collect(),
        );
        rows.extend(
            dataset
                .iter()
                .map(|record| record.values().map(Cell::from).collect()),
        );

        Self {
            name: name.into(),
            rows,
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All rows, header first
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of columns (width of the header row)
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of data rows, header excluded
    pub fn record_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use chrono::TimeZone;

    #[test]
    fn test_sheet_from_dataset() {
        let ts = Utc.with_ymd_and_hms(2023, 3, 4, 5, 6, 7).unwrap();
        let dataset = Dataset::from_records(vec![Record::new()
            .field("Company\t", "00123")
            .field("Age", 30i64)
            .field("Activated", false)
            .field("Created At ", ts)])
        .unwrap();

        let sheet = Sheet::from_dataset(DEFAULT_SHEET_NAME, &dataset);

        assert_eq!(sheet.name(), "Sheet 1");
        assert_eq!(sheet.column_count(), 4);
        assert_eq!(sheet.record_count(), 1);
        assert_eq!(sheet.rows()[0][0], Cell::Text("Company\t".to_string()));
        assert_eq!(
            sheet.rows()[1],
            vec![
                Cell::Text("00123".to_string()),
                Cell::Number(30),
                Cell::Boolean(false),
                Cell::Date(ts),
            ]
        );
    }
}
