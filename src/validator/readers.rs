//! Read any fixture file back into a grid of canonical text cells.
//!
//! Cells use the same text forms the delimited encoders write: integers in
//! decimal, booleans as `true`/`false`, timestamps as RFC 3339 with
//! milliseconds. Typed spreadsheet and Parquet cells are converted back to
//! those forms, so tables from different formats compare cell by cell.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, BooleanArray, Int64Array, StringArray, TimestampMillisecondArray};
use arrow::datatypes::{DataType, Schema as ArrowSchema, TimeUnit};
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, NaiveDateTime};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use super::ValidationError;
use crate::dataset::format_timestamp;
use crate::writer::{date_from_serial, Format, COMMA, TAB};

/// Header and data rows of one fixture file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column names, in file order
    pub headers: Vec<String>,
    /// Data rows, header excluded
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A Parquet file read back with its schema and footer metadata
#[derive(Debug, Clone)]
pub struct ParquetTable {
    /// Cells as canonical text
    pub table: Table,
    /// Arrow schema stored in the file
    pub schema: Arc<ArrowSchema>,
    /// Footer key-value metadata
    pub key_value: HashMap<String, String>,
}

/// Read a fixture file of the given format
pub fn read_table(format: Format, path: &Path) -> Result<Table, ValidationError> {
    match format {
        Format::Csv => read_delimited(path, COMMA),
        Format::Tsv => read_delimited(path, TAB),
        Format::Json => read_json_array(path),
        Format::JsonLines => read_json_lines(path),
        Format::Ods => read_ods(path),
        Format::Xlsx => read_xlsx(path),
        Format::Parquet => read_parquet(path).map(|p| p.table),
    }
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Table, ValidationError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

type JsonObject = serde_json::Map<String, serde_json::Value>;

fn json_cell(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn table_from_objects(objects: Vec<JsonObject>) -> Result<Table, ValidationError> {
    let headers: Vec<String> = objects
        .first()
        .map(|o| o.keys().cloned().collect())
        .unwrap_or_default();

    let mut rows = Vec::with_capacity(objects.len());
    for (index, object) in objects.iter().enumerate() {
        if object.len() != headers.len() {
            return Err(ValidationError::MalformedError(format!(
                "object {} has {} keys, expected {}",
                index,
                object.len(),
                headers.len()
            )));
        }
        let row = headers
            .iter()
            .map(|h| {
                object.get(h).map(json_cell).ok_or_else(|| {
                    ValidationError::MalformedError(format!("object {} is missing key {:?}", index, h))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    Ok(Table { headers, rows })
}

fn read_json_array(path: &Path) -> Result<Table, ValidationError> {
    let reader = BufReader::new(File::open(path)?);
    let objects: Vec<JsonObject> = serde_json::from_reader(reader)?;
    table_from_objects(objects)
}

/// Every physical line must hold exactly one JSON object
fn read_json_lines(path: &Path) -> Result<Table, ValidationError> {
    let reader = BufReader::new(File::open(path)?);
    let mut objects = Vec::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let object: JsonObject = serde_json::from_str(&line).map_err(|e| {
            ValidationError::MalformedError(format!("line {} is not a JSON object: {}", number + 1, e))
        })?;
        objects.push(object);
    }
    table_from_objects(objects)
}

fn read_zip_entry(path: &Path, name: &str) -> Result<String, ValidationError> {
    let mut archive = ZipArchive::new(BufReader::new(File::open(path)?))?;
    let mut entry = archive.by_name(name)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

fn attribute(element: &BytesStart<'_>, name: &str) -> Result<Option<String>, ValidationError> {
    match element.try_get_attribute(name)? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Place a cell at `column`, padding skipped columns with empty text
fn set_cell(row: &mut Vec<String>, column: usize, value: String) {
    if row.len() <= column {
        row.resize(column + 1, String::new());
    }
    row[column] = value;
}

fn split_header(mut grid: Vec<Vec<String>>) -> Table {
    if grid.is_empty() {
        return Table::default();
    }
    let headers = grid.remove(0);
    Table { headers, rows: grid }
}

/// Zero-based column index from a cell reference such as `AB12`
fn column_index(reference: &str) -> Option<usize> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_uppercase())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for b in letters {
        index = index * 26 + (b - b'A' + 1) as usize;
    }
    Some(index - 1)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum XlsxCellKind {
    InlineString,
    Boolean,
    Date,
    Number,
    Formula,
}

fn read_xlsx(path: &Path) -> Result<Table, ValidationError> {
    let xml = read_zip_entry(path, "xl/worksheets/sheet1.xml")?;
    let mut reader = Reader::from_str(&xml);

    let mut grid: Vec<Vec<String>> = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<(usize, XlsxCellKind)> = None;
    let mut next_column = 0usize;
    let mut value = String::new();
    let mut in_value = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"row" => {
                    row = Some(Vec::new());
                    next_column = 0;
                }
                b"c" => {
                    let column = attribute(&e, "r")?
                        .and_then(|r| column_index(&r))
                        .unwrap_or(next_column);
                    let kind = match attribute(&e, "t")?.as_deref() {
                        Some("inlineStr") => XlsxCellKind::InlineString,
                        Some("b") => XlsxCellKind::Boolean,
                        Some("str") => XlsxCellKind::Formula,
                        Some("s") => {
                            return Err(ValidationError::MalformedError(
                                "shared strings are not supported".to_string(),
                            ))
                        }
                        _ if attribute(&e, "s")?.as_deref() == Some("1") => XlsxCellKind::Date,
                        _ => XlsxCellKind::Number,
                    };
                    cell = Some((column, kind));
                    value.clear();
                }
                b"t" | b"v" => in_value = true,
                _ => {}
            },
            Event::Text(t) if in_value => value.push_str(&t.unescape()?),
            Event::End(e) => match e.name().as_ref() {
                b"t" | b"v" => in_value = false,
                b"c" => {
                    if let (Some(row), Some((column, kind))) = (row.as_mut(), cell.take()) {
                        let text = match kind {
                            XlsxCellKind::Boolean => (value == "1").to_string(),
                            XlsxCellKind::Date => {
                                let serial: f64 = value.parse().map_err(|_| {
                                    ValidationError::MalformedError(format!("bad date serial {:?}", value))
                                })?;
                                let ts = date_from_serial(serial).ok_or_else(|| {
                                    ValidationError::MalformedError(format!("date serial out of range: {}", serial))
                                })?;
                                format_timestamp(&ts)
                            }
                            _ => std::mem::take(&mut value),
                        };
                        set_cell(row, column, text);
                        next_column = column + 1;
                    }
                }
                b"row" => {
                    if let Some(finished) = row.take() {
                        grid.push(finished);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(split_header(grid))
}

#[derive(Default)]
struct OdsCell {
    typed: Option<String>,
    text: String,
    paragraphs: usize,
}

fn ods_typed_value(element: &BytesStart<'_>) -> Result<Option<String>, ValidationError> {
    let value_type = attribute(element, "office:value-type")?;
    let typed = match value_type.as_deref() {
        Some("float") | Some("percentage") | Some("currency") => attribute(element, "office:value")?,
        Some("boolean") => attribute(element, "office:boolean-value")?,
        Some("date") => match attribute(element, "office:date-value")? {
            Some(raw) => {
                let naive = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .or_else(|_| NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S"))
                    .map_err(|_| ValidationError::MalformedError(format!("bad date value {:?}", raw)))?;
                Some(format_timestamp(&naive.and_utc()))
            }
            None => None,
        },
        _ => None,
    };
    Ok(typed)
}

fn read_ods(path: &Path) -> Result<Table, ValidationError> {
    let xml = read_zip_entry(path, "content.xml")?;
    let mut reader = Reader::from_str(&xml);

    let mut grid: Vec<Vec<String>> = Vec::new();
    let mut row: Option<Vec<String>> = None;
    let mut cell: Option<OdsCell> = None;
    let mut in_paragraph = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"table:table-row" => row = Some(Vec::new()),
                b"table:table-cell" => {
                    cell = Some(OdsCell {
                        typed: ods_typed_value(&e)?,
                        ..Default::default()
                    })
                }
                b"text:p" => {
                    if let Some(cell) = cell.as_mut() {
                        if cell.paragraphs > 0 {
                            cell.text.push('\n');
                        }
                        cell.paragraphs += 1;
                    }
                    in_paragraph = true;
                }
                _ => {}
            },
            Event::Empty(e) => {
                let name = e.name();
                match name.as_ref() {
                    b"table:table-cell" => {
                        if let Some(row) = row.as_mut() {
                            row.push(ods_typed_value(&e)?.unwrap_or_default());
                        }
                    }
                    b"text:s" if in_paragraph => {
                        let count = attribute(&e, "text:c")?
                            .and_then(|c| c.parse::<usize>().ok())
                            .unwrap_or(1);
                        if let Some(cell) = cell.as_mut() {
                            cell.text.extend(std::iter::repeat(' ').take(count));
                        }
                    }
                    b"text:tab" if in_paragraph => {
                        if let Some(cell) = cell.as_mut() {
                            cell.text.push('\t');
                        }
                    }
                    b"text:line-break" if in_paragraph => {
                        if let Some(cell) = cell.as_mut() {
                            cell.text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) if in_paragraph => {
                if let Some(cell) = cell.as_mut() {
                    cell.text.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"text:p" => in_paragraph = false,
                b"table:table-cell" => {
                    if let (Some(row), Some(finished)) = (row.as_mut(), cell.take()) {
                        row.push(finished.typed.unwrap_or(finished.text));
                    }
                }
                b"table:table-row" => {
                    if let Some(finished) = row.take() {
                        grid.push(finished);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(split_header(grid))
}

fn parquet_cell(column: &dyn Array, row: usize) -> Result<String, ValidationError> {
    if column.is_null(row) {
        return Ok(String::new());
    }

    let any = column.as_any();
    let text = match column.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| a.value(row).to_string()),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| a.value(row).to_string()),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| a.value(row).to_string()),
        DataType::Timestamp(TimeUnit::Millisecond, _) => any
            .downcast_ref::<TimestampMillisecondArray>()
            .and_then(|a| DateTime::from_timestamp_millis(a.value(row)))
            .map(|ts| format_timestamp(&ts)),
        _ => Some(array_value_to_string(column, row)?),
    };

    text.ok_or_else(|| {
        ValidationError::MalformedError(format!(
            "column of type {} could not be read",
            column.data_type()
        ))
    })
}

/// Read a Parquet file with its stored schema and footer metadata
pub fn read_parquet(path: &Path) -> Result<ParquetTable, ValidationError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(path)?)?;
    let schema = builder.schema().clone();

    let key_value = builder
        .metadata()
        .file_metadata()
        .key_value_metadata()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|kv| kv.value.clone().map(|v| (kv.key.clone(), v)))
                .collect()
        })
        .unwrap_or_default();

    let headers = schema.fields().iter().map(|f| f.name().clone()).collect();
    let mut rows = Vec::new();
    for batch in builder.build()? {
        let batch = batch?;
        for row in 0..batch.num_rows() {
            let cells = batch
                .columns()
                .iter()
                .map(|column| parquet_cell(column.as_ref(), row))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(cells);
        }
    }

    Ok(ParquetTable {
        table: Table { headers, rows },
        schema,
        key_value,
    })
}
