//! Property tests for delimited escaping and Int64 narrowing.

use proptest::prelude::*;

use userdata_fixtures::dataset::{Dataset, Record, Value};
use userdata_fixtures::schema::{coerce, parse_decimal_digits, Coerced, WireType};
use userdata_fixtures::writer::{write_delimited, COMMA, TAB};

fn read_back(bytes: &[u8], delimiter: u8) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(bytes);
    let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any text, including delimiters, quotes and line breaks, survives a
    /// write/read cycle unchanged, and every line ends with `\n`
    #[test]
    fn test_delimited_escaping_preserves_text(
        names in prop::collection::vec("[ \t]{0,2}[A-Za-z][A-Za-z ,\t]{0,6}", 1..5),
        cells in prop::collection::vec(prop::collection::vec(any::<String>(), 5), 1..6),
        use_tab in any::<bool>(),
    ) {
        let mut unique = names.clone();
        unique.sort();
        unique.dedup();
        prop_assume!(unique.len() == names.len());

        let records: Vec<Record> = cells
            .iter()
            .map(|row| {
                names
                    .iter()
                    .zip(row)
                    .fold(Record::new(), |record, (name, cell)| record.field(name.as_str(), cell.as_str()))
            })
            .collect();
        let dataset = Dataset::from_records(records).unwrap();

        let delimiter = if use_tab { TAB } else { COMMA };
        let mut out = Vec::new();
        let written = write_delimited(&dataset, &mut out, delimiter).unwrap();
        prop_assert_eq!(written, cells.len());
        prop_assert!(out.ends_with(b"\n"));

        let (headers, rows) = read_back(&out, delimiter);
        prop_assert_eq!(&headers, &names);
        let expected: Vec<Vec<String>> = cells
            .iter()
            .map(|row| row[..names.len()].to_vec())
            .collect();
        prop_assert_eq!(rows, expected);
    }

    /// Digit strings narrow to the integer they spell, leading zeros dropped
    #[test]
    fn test_digit_strings_narrow_to_int64(n in 0i64..=i64::MAX, zeros in 0usize..4) {
        let text = format!("{}{}", "0".repeat(zeros), n);
        prop_assert_eq!(parse_decimal_digits(&text).unwrap(), n);
        let value = Value::Text(text);
        prop_assert_eq!(coerce(WireType::Int64, &value).unwrap(), Coerced::Int64(n));
    }

    /// Anything with a non-digit character is rejected, never truncated
    #[test]
    fn test_non_digit_strings_rejected(prefix in "[0-9]{0,4}", bad in "[^0-9]", suffix in "[0-9]{0,4}") {
        let text = format!("{}{}{}", prefix, bad, suffix);
        prop_assert!(parse_decimal_digits(&text).is_err());
        let value = Value::Text(text);
        prop_assert!(coerce(WireType::Int64, &value).is_err());
    }
}

#[test]
fn test_int64_overflow_rejected() {
    assert!(parse_decimal_digits("9223372036854775807").is_ok());
    assert!(parse_decimal_digits("9223372036854775808").is_err());
    assert!(parse_decimal_digits("").is_err());
}
