use crate::schema::{Schema, KEY_FORMAT_VERSION, KEY_RECORD_COUNT, USERDATA_FORMAT_VERSION};

use super::readers::ParquetTable;
use super::{ValidationCheck, ValidationReport};

/// Step 3: the Parquet file carries the declared column types and footer
pub(crate) fn check_parquet_contract(parquet: &ParquetTable, schema: &Schema, report: &mut ValidationReport) {
    let mut problems = Vec::new();
    for field in schema.fields() {
        let expected = field.wire_type().to_arrow();
        match parquet.schema.field_with_name(field.name()) {
            Ok(actual) if actual.data_type() == &expected => {}
            Ok(actual) => problems.push(format!(
                "{:?} is {}, expected {}",
                field.name(),
                actual.data_type(),
                expected
            )),
            Err(_) => problems.push(format!("{:?} is missing", field.name())),
        }
    }
    report.add_check(ValidationCheck::check(
        "parquet column types",
        problems.is_empty(),
        || problems.join("; "),
    ));

    match parquet.key_value.get(KEY_FORMAT_VERSION) {
        Some(version) if version == USERDATA_FORMAT_VERSION => {
            report.add_check(ValidationCheck::ok("parquet format version"))
        }
        Some(version) => report.add_check(ValidationCheck::failed(
            "parquet format version",
            format!("found {}, expected {}", version, USERDATA_FORMAT_VERSION),
        )),
        None => report.add_check(ValidationCheck::warning(
            "parquet format version",
            format!("footer has no {} entry", KEY_FORMAT_VERSION),
        )),
    }

    let rows = parquet.table.row_count();
    match parquet.key_value.get(KEY_RECORD_COUNT) {
        Some(count) => report.add_check(ValidationCheck::check(
            "parquet footer record count",
            count.parse::<usize>().ok() == Some(rows),
            || format!("footer says {}, file holds {} rows", count, rows),
        )),
        None => report.add_check(ValidationCheck::warning(
            "parquet footer record count",
            format!("footer has no {} entry", KEY_RECORD_COUNT),
        )),
    }
}
