use super::*;
use crate::dataset::Record;
use crate::schema::{SchemaField, WireType};
use std::io::Read;
use tempfile::tempdir;

fn people() -> Dataset {
    Dataset::from_records(vec![
        Record::new().field("Name", "Alice").field("Age", 30i64),
        Record::new().field("Name", "Bob").field("Age", 25i64),
        Record::new().field("Name", "Carol").field("Age", 40i64),
    ])
    .unwrap()
}

fn people_schema() -> Schema {
    Schema::new(vec![
        SchemaField::new("Name", WireType::Utf8),
        SchemaField::new("Age", WireType::Int64),
    ])
}

#[test]
fn test_output_path() {
    let path = output_path(Path::new("testdata"), "userdata", Format::JsonLines);
    assert_eq!(path, PathBuf::from("testdata/userdata.jsonl"));
}

#[test]
fn test_encode_every_format() {
    let dir = tempdir().unwrap();
    let dataset = people();
    let schema = people_schema();
    let sheet = Sheet::from_dataset(DEFAULT_SHEET_NAME, &dataset);
    let columnar = ColumnarWriterConfig::default();
    let ctx = EncodeContext {
        dataset: &dataset,
        schema: &schema,
        sheet: &sheet,
        columnar: &columnar,
    };

    for format in Format::ALL {
        let path = output_path(dir.path(), "people", format);
        let summary = encode(format, &ctx, &path).unwrap();

        assert_eq!(summary.format, format);
        assert_eq!(summary.records_written, 3);
        assert_eq!(summary.path, path);
        assert_eq!(summary.file_size_bytes, std::fs::metadata(&path).unwrap().len());
    }

    assert_eq!(
        std::fs::read_to_string(dir.path().join("people.csv")).unwrap(),
        "Name,Age\nAlice,30\nBob,25\nCarol,40\n"
    );
    assert_eq!(
        std::fs::read_to_string(dir.path().join("people.json")).unwrap(),
        r#"[{"Name":"Alice","Age":30},{"Name":"Bob","Age":25},{"Name":"Carol","Age":40}]"#
    );

    let entries = std::fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(entries, Format::ALL.len());
}

#[test]
fn test_spreadsheet_containers() {
    let dir = tempdir().unwrap();
    let dataset = people();
    let schema = people_schema();
    let sheet = Sheet::from_dataset(DEFAULT_SHEET_NAME, &dataset);
    let columnar = ColumnarWriterConfig::default();
    let ctx = EncodeContext {
        dataset: &dataset,
        schema: &schema,
        sheet: &sheet,
        columnar: &columnar,
    };

    let ods_path = dir.path().join("people.ods");
    encode(Format::Ods, &ctx, &ods_path).unwrap();
    let mut ods = zip::ZipArchive::new(std::fs::File::open(&ods_path).unwrap()).unwrap();
    {
        let mut first = ods.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), zip::CompressionMethod::Stored);
        let mut mimetype = String::new();
        first.read_to_string(&mut mimetype).unwrap();
        assert_eq!(mimetype, ODS_MIMETYPE);
    }
    let mut content = String::new();
    ods.by_name("content.xml")
        .unwrap()
        .read_to_string(&mut content)
        .unwrap();
    assert!(content.contains(r#"table:name="Sheet 1""#));
    assert!(content.contains(r#"office:value-type="float" office:value="30""#));

    let xlsx_path = dir.path().join("people.xlsx");
    encode(Format::Xlsx, &ctx, &xlsx_path).unwrap();
    let mut xlsx = zip::ZipArchive::new(std::fs::File::open(&xlsx_path).unwrap()).unwrap();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/styles.xml",
        "xl/worksheets/sheet1.xml",
    ] {
        assert!(xlsx.by_name(part).is_ok(), "missing {}", part);
    }
    let mut worksheet = String::new();
    xlsx.by_name("xl/worksheets/sheet1.xml")
        .unwrap()
        .read_to_string(&mut worksheet)
        .unwrap();
    assert!(worksheet.contains(r#"<dimension ref="A1:B4"/>"#));
    assert!(worksheet.contains(r#"<c r="B2"><v>30</v></c>"#));
}

#[test]
fn test_failed_encode_leaves_no_file() {
    let dir = tempdir().unwrap();
    let dataset = Dataset::from_records(vec![Record::new()
        .field("Name", "Alice")
        .field("Age", "thirty")])
    .unwrap();
    let schema = people_schema();
    let sheet = Sheet::from_dataset(DEFAULT_SHEET_NAME, &dataset);
    let columnar = ColumnarWriterConfig::default();
    let ctx = EncodeContext {
        dataset: &dataset,
        schema: &schema,
        sheet: &sheet,
        columnar: &columnar,
    };

    let path = dir.path().join("people.parquet");
    let err = encode(Format::Parquet, &ctx, &path).unwrap_err();

    assert!(matches!(err, EncodeError::SchemaMismatch(_)));
    assert!(!path.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unwritable_target_is_io_error() {
    let dir = tempdir().unwrap();
    let dataset = people();
    let schema = people_schema();
    let sheet = Sheet::from_dataset(DEFAULT_SHEET_NAME, &dataset);
    let columnar = ColumnarWriterConfig::default();
    let ctx = EncodeContext {
        dataset: &dataset,
        schema: &schema,
        sheet: &sheet,
        columnar: &columnar,
    };

    let path = dir.path().join("missing").join("people.csv");
    assert!(matches!(
        encode(Format::Csv, &ctx, &path),
        Err(EncodeError::IoError(_))
    ));
}

#[test]
fn test_spreadsheet_text_control_characters() {
    let dir = tempdir().unwrap();
    let schema = Schema::new(vec![SchemaField::new("Note", WireType::Utf8)]);
    let columnar = ColumnarWriterConfig::default();

    // Carriage returns survive a spreadsheet write/read cycle
    let dataset = Dataset::from_records(vec![Record::new().field("Note", "a\r\nb")]).unwrap();
    let sheet = Sheet::from_dataset(DEFAULT_SHEET_NAME, &dataset);
    let ctx = EncodeContext {
        dataset: &dataset,
        schema: &schema,
        sheet: &sheet,
        columnar: &columnar,
    };
    for format in [Format::Ods, Format::Xlsx] {
        let path = output_path(dir.path(), "notes", format);
        encode(format, &ctx, &path).unwrap();
        let table = crate::validator::read_table(format, &path).unwrap();
        assert_eq!(table.rows, vec![vec!["a\r\nb".to_string()]], "{}", format);
    }

    // Characters XML 1.0 cannot carry fail the spreadsheet encoders only
    let dataset = Dataset::from_records(vec![Record::new().field("Note", "bell\u{7}x")]).unwrap();
    let sheet = Sheet::from_dataset(DEFAULT_SHEET_NAME, &dataset);
    let ctx = EncodeContext {
        dataset: &dataset,
        schema: &schema,
        sheet: &sheet,
        columnar: &columnar,
    };
    for format in [Format::Ods, Format::Xlsx] {
        let path = output_path(dir.path(), "bell", format);
        assert!(matches!(encode(format, &ctx, &path), Err(EncodeError::XmlError(_))));
        assert!(!path.exists());
    }
    assert!(encode(Format::Csv, &ctx, &output_path(dir.path(), "bell", Format::Csv)).is_ok());
}
