//! Office Open XML workbook container.
//!
//! A minimal SpreadsheetML package: one worksheet with inline strings, so
//! no shared-string table is needed. Dates are serial day numbers styled
//! with a date-time number format (`cellXfs` index 1).

use std::io::{Seek, Write};

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::sheet::{Cell, Sheet};
use super::xml::XmlPart;
use super::EncodeError;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Serial day number of 1970-01-01 in the 1900 date system
const UNIX_EPOCH_SERIAL: f64 = 25_569.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Style index of date cells in `xl/styles.xml`
const DATE_STYLE: &str = "1";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/><Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><numFmts count="1"><numFmt numFmtId="164" formatCode="yyyy\-mm\-dd\ hh:mm:ss.000"/></numFmts><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="164" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs><cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles></styleSheet>"#;

const CORE_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:creator>userdata-fixtures</dc:creator></cp:coreProperties>"#;

const APP_PROPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>userdata-fixtures</Application></Properties>"#;

/// Convert an instant to a 1900-system serial day number
pub fn date_serial(timestamp: &DateTime<Utc>) -> f64 {
    UNIX_EPOCH_SERIAL + timestamp.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Convert a serial day number back to an instant, rounded to the millisecond
pub fn date_from_serial(serial: f64) -> Option<DateTime<Utc>> {
    let millis = ((serial - UNIX_EPOCH_SERIAL) * MILLIS_PER_DAY).round();
    if !millis.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

/// Spreadsheet column letters for a zero-based index (`0` → `A`, `26` → `AA`)
pub fn column_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

/// Persist a sheet as an XLSX workbook. Returns the inner writer.
pub fn write_xlsx<W: Write + Seek>(sheet: &Sheet, inner: W) -> Result<W, EncodeError> {
    let mut zip = ZipWriter::new(inner);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let parts: [(&str, &[u8]); 6] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
        ("xl/styles.xml", STYLES.as_bytes()),
        ("docProps/core.xml", CORE_PROPS.as_bytes()),
        ("docProps/app.xml", APP_PROPS.as_bytes()),
    ];
    for (name, bytes) in parts {
        zip.start_file(name, options)?;
        zip.write_all(bytes)?;
    }

    zip.start_file("xl/workbook.xml", options)?;
    zip.write_all(&workbook_xml(sheet)?)?;

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(&worksheet_xml(sheet)?)?;

    Ok(zip.finish()?)
}

fn workbook_xml(sheet: &Sheet) -> Result<Vec<u8>, EncodeError> {
    let mut part = XmlPart::new()?;
    part.open("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])?;
    part.open("sheets", &[])?;
    part.empty(
        "sheet",
        &[("name", sheet.name()), ("sheetId", "1"), ("r:id", "rId1")],
    )?;
    part.close("sheets")?;
    part.close("workbook")?;
    Ok(part.into_bytes())
}

fn worksheet_xml(sheet: &Sheet) -> Result<Vec<u8>, EncodeError> {
    let mut part = XmlPart::new()?;
    part.open("worksheet", &[("xmlns", NS_MAIN)])?;

    let last_column = column_name(sheet.column_count().saturating_sub(1));
    let dimension = format!("A1:{}{}", last_column, sheet.rows().len().max(1));
    part.empty("dimension", &[("ref", dimension.as_str())])?;

    part.open("sheetData", &[])?;
    for (r, row) in sheet.rows().iter().enumerate() {
        let row_number = (r + 1).to_string();
        part.open("row", &[("r", row_number.as_str())])?;
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{}", column_name(c), row_number);
            write_cell(&mut part, &reference, cell)?;
        }
        part.close("row")?;
    }
    part.close("sheetData")?;

    part.close("worksheet")?;
    Ok(part.into_bytes())
}

fn write_cell(part: &mut XmlPart, reference: &str, cell: &Cell) -> Result<(), EncodeError> {
    match cell {
        Cell::Text(text) => {
            part.open("c", &[("r", reference), ("t", "inlineStr")])?;
            part.open("is", &[])?;
            part.element("t", &[("xml:space", "preserve")], text)?;
            part.close("is")?;
        }
        Cell::Number(n) => {
            part.open("c", &[("r", reference)])?;
            part.element("v", &[], &n.to_string())?;
        }
        Cell::Boolean(b) => {
            part.open("c", &[("r", reference), ("t", "b")])?;
            part.element("v", &[], if *b { "1" } else { "0" })?;
        }
        Cell::Date(ts) => {
            part.open("c", &[("r", reference), ("s", DATE_STYLE)])?;
            part.element("v", &[], &date_serial(ts).to_string())?;
        }
    }
    part.close("c")
}
