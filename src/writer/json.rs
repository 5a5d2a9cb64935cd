use std::io::Write;

use super::EncodeError;
use crate::dataset::Dataset;

/// Write the dataset as one JSON array of objects.
///
/// Keys appear in field order with their literal names. Text, integer and
/// boolean values keep their JSON type; timestamps become their canonical
/// string. Nothing follows the closing bracket.
pub fn write_json_array<W: Write>(dataset: &Dataset, mut writer: W) -> Result<usize, EncodeError> {
    serde_json::to_writer(&mut writer, dataset.records())?;
    Ok(dataset.len())
}

/// Write the dataset as JSON Lines: one compact object per line.
///
/// String escaping keeps embedded newlines as `\n`, so the line count always
/// equals the record count.
pub fn write_json_lines<W: Write>(dataset: &Dataset, mut writer: W) -> Result<usize, EncodeError> {
    let mut written = 0;
    for record in dataset {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;
    use chrono::{TimeZone, Utc};

    fn sample() -> Dataset {
        let ts = Utc.with_ymd_and_hms(2023, 1, 2, 3, 4, 5).unwrap();
        Dataset::from_records(vec![
            Record::new()
                .field(" Name ", "Alice")
                .field("Age", 30i64)
                .field("Created At ", ts)
                .field("Activated", true),
            Record::new()
                .field(" Name ", "Bob\n\"B\"")
                .field("Age", 25i64)
                .field("Created At ", ts)
                .field("Activated", false),
        ])
        .unwrap()
    }

    #[test]
    fn test_json_array_keeps_order_and_types() {
        let mut buf = Vec::new();
        assert_eq!(write_json_array(&sample(), &mut buf).unwrap(), 2);

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(
            r#"[{" Name ":"Alice","Age":30,"Created At ":"2023-01-02T03:04:05.000Z","Activated":true},"#
        ));
        assert!(text.ends_with("}]"));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[1][" Name "], "Bob\n\"B\"");
    }

    #[test]
    fn test_json_lines_one_record_per_line() {
        let mut buf = Vec::new();
        assert_eq!(write_json_lines(&sample(), &mut buf).unwrap(), 2);

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(text.ends_with('\n'));

        for line in lines {
            let obj: serde_json::Map<String, serde_json::Value> = serde_json::from_str(line).unwrap();
            let keys: Vec<_> = obj.keys().map(String::as_str).collect();
            assert_eq!(keys, vec![" Name ", "Age", "Created At ", "Activated"]);
        }
    }
}
