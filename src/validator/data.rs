use crate::schema::{parse_decimal_digits, Schema, WireType};
use crate::writer::Format;

use super::readers::Table;
use super::{ValidationCheck, ValidationReport};

/// Step 4: every readable table agrees on headers, row count and cells.
///
/// The JSON array is the reference when present. Parquet cells are compared
/// after narrowing Int64 columns the same way the encoder does.
pub(crate) fn check_contents(
    tables: &[(Format, Table)],
    schema: &Schema,
    expected_rows: Option<usize>,
    report: &mut ValidationReport,
) {
    let reference = tables
        .iter()
        .find(|(format, _)| *format == Format::Json)
        .or_else(|| tables.iter().find(|(format, _)| !format.is_typed()));

    let expected_rows = expected_rows.or_else(|| reference.map(|(_, t)| t.row_count()));
    let schema_names: Vec<&str> = schema.names().collect();

    for (format, table) in tables {
        report.add_check(ValidationCheck::check(
            format!("{} field order", format),
            table.headers.iter().map(String::as_str).eq(schema_names.iter().copied()),
            || format!("found {:?}", table.headers),
        ));

        if let Some(expected) = expected_rows {
            report.add_check(ValidationCheck::check(
                format!("{} record count", format),
                table.row_count() == expected,
                || format!("found {} records, expected {}", table.row_count(), expected),
            ));
        }

        let Some((reference_format, reference_table)) = reference else {
            continue;
        };
        if format == reference_format {
            continue;
        }

        let mismatch = if format.is_typed() {
            first_mismatch(reference_table, table, |column, cell| {
                normalize_for(schema, column, cell)
            })
        } else {
            first_mismatch(reference_table, table, |_, cell| cell.to_string())
        };
        report.add_check(ValidationCheck::check(
            format!("{} cells match {}", format, reference_format),
            mismatch.is_none(),
            || mismatch.clone().unwrap_or_default(),
        ));
    }
}

/// Reference cell as the typed encoder would store it
fn normalize_for(schema: &Schema, column: usize, cell: &str) -> String {
    match schema.fields().get(column).map(|f| f.wire_type()) {
        Some(WireType::Int64) => parse_decimal_digits(cell)
            .map(|n| n.to_string())
            .unwrap_or_else(|_| cell.to_string()),
        _ => cell.to_string(),
    }
}

fn first_mismatch<F>(reference: &Table, other: &Table, expected_cell: F) -> Option<String>
where
    F: Fn(usize, &str) -> String,
{
    for (r, (want_row, got_row)) in reference.rows.iter().zip(&other.rows).enumerate() {
        if want_row.len() != got_row.len() {
            return Some(format!(
                "record {} has {} cells, expected {}",
                r,
                got_row.len(),
                want_row.len()
            ));
        }
        for (c, (want, got)) in want_row.iter().zip(got_row).enumerate() {
            let want = expected_cell(c, want);
            if &want != got {
                let column = reference.headers.get(c).map(String::as_str).unwrap_or("?");
                return Some(format!(
                    "record {}, field {:?}: expected {:?}, found {:?}",
                    r, column, want, got
                ));
            }
        }
    }
    None
}
