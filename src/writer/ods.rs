//! OpenDocument spreadsheet container.
//!
//! The `mimetype` entry comes first and is stored uncompressed so the file
//! can be identified by magic bytes; the XML parts follow deflated.

use std::io::{Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::sheet::{Cell, Sheet};
use super::xml::XmlPart;
use super::EncodeError;
use crate::dataset::format_timestamp;

/// Media type of an OpenDocument spreadsheet
pub const ODS_MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

const NS_OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
const NS_STYLE: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
const NS_TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
const NS_TABLE: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
const NS_NUMBER: &str = "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0";
const ODF_VERSION: &str = "1.2";

/// Automatic cell style carrying the date-time data style
const DATE_CELL_STYLE: &str = "ce1";
const DATE_DATA_STYLE: &str = "N1";

const MANIFEST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2"><manifest:file-entry manifest:full-path="/" manifest:version="1.2" manifest:media-type="application/vnd.oasis.opendocument.spreadsheet"/><manifest:file-entry manifest:full-path="content.xml" manifest:media-type="text/xml"/><manifest:file-entry manifest:full-path="styles.xml" manifest:media-type="text/xml"/><manifest:file-entry manifest:full-path="meta.xml" manifest:media-type="text/xml"/></manifest:manifest>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" office:version="1.2"><office:styles><style:default-style style:family="table-cell"/></office:styles></office:document-styles>"#;

const META: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0" office:version="1.2"><office:meta><meta:generator>userdata-fixtures</meta:generator></office:meta></office:document-meta>"#;

/// Persist a sheet as an ODS document. Returns the inner writer.
pub fn write_ods<W: Write + Seek>(sheet: &Sheet, inner: W) -> Result<W, EncodeError> {
    let mut zip = ZipWriter::new(inner);

    // mimetype MUST be first and uncompressed
    let stored = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .unix_permissions(0o644);
    zip.start_file("mimetype", stored)?;
    zip.write_all(ODS_MIMETYPE.as_bytes())?;

    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    zip.start_file("META-INF/manifest.xml", deflated)?;
    zip.write_all(MANIFEST.as_bytes())?;

    zip.start_file("styles.xml", deflated)?;
    zip.write_all(STYLES.as_bytes())?;

    zip.start_file("meta.xml", deflated)?;
    zip.write_all(META.as_bytes())?;

    zip.start_file("content.xml", deflated)?;
    zip.write_all(&content_xml(sheet)?)?;

    Ok(zip.finish()?)
}

fn content_xml(sheet: &Sheet) -> Result<Vec<u8>, EncodeError> {
    let mut part = XmlPart::new()?;
    part.open(
        "office:document-content",
        &[
            ("xmlns:office", NS_OFFICE),
            ("xmlns:style", NS_STYLE),
            ("xmlns:text", NS_TEXT),
            ("xmlns:table", NS_TABLE),
            ("xmlns:number", NS_NUMBER),
            ("office:version", ODF_VERSION),
        ],
    )?;

    write_automatic_styles(&mut part)?;

    part.open("office:body", &[])?;
    part.open("office:spreadsheet", &[])?;
    part.open("table:table", &[("table:name", sheet.name())])?;

    let columns = sheet.column_count().max(1).to_string();
    part.empty(
        "table:table-column",
        &[("table:number-columns-repeated", columns.as_str())],
    )?;

    for row in sheet.rows() {
        part.open("table:table-row", &[])?;
        for cell in row {
            write_cell(&mut part, cell)?;
        }
        part.close("table:table-row")?;
    }

    part.close("table:table")?;
    part.close("office:spreadsheet")?;
    part.close("office:body")?;
    part.close("office:document-content")?;
    Ok(part.into_bytes())
}

/// `YYYY-MM-DD hh:mm:ss.sss` display style for date cells
fn write_automatic_styles(part: &mut XmlPart) -> Result<(), EncodeError> {
    part.open("office:automatic-styles", &[])?;

    part.open("number:date-style", &[("style:name", DATE_DATA_STYLE)])?;
    part.empty("number:year", &[("number:style", "long")])?;
    part.element("number:text", &[], "-")?;
    part.empty("number:month", &[("number:style", "long")])?;
    part.element("number:text", &[], "-")?;
    part.empty("number:day", &[("number:style", "long")])?;
    part.element("number:text", &[], " ")?;
    part.empty("number:hours", &[("number:style", "long")])?;
    part.element("number:text", &[], ":")?;
    part.empty("number:minutes", &[("number:style", "long")])?;
    part.element("number:text", &[], ":")?;
    part.empty(
        "number:seconds",
        &[("number:style", "long"), ("number:decimal-places", "3")],
    )?;
    part.close("number:date-style")?;

    part.empty(
        "style:style",
        &[
            ("style:name", DATE_CELL_STYLE),
            ("style:family", "table-cell"),
            ("style:data-style-name", DATE_DATA_STYLE),
        ],
    )?;

    part.close("office:automatic-styles")
}

fn write_cell(part: &mut XmlPart, cell: &Cell) -> Result<(), EncodeError> {
    let display = match cell {
        Cell::Text(text) => {
            part.open("table:table-cell", &[("office:value-type", "string")])?;
            part.open("text:p", &[])?;
            write_paragraph_text(part, text)?;
            part.close("text:p")?;
            return part.close("table:table-cell");
        }
        Cell::Number(n) => {
            let value = n.to_string();
            part.open(
                "table:table-cell",
                &[("office:value-type", "float"), ("office:value", value.as_str())],
            )?;
            value
        }
        Cell::Boolean(b) => {
            let value = b.to_string();
            part.open(
                "table:table-cell",
                &[
                    ("office:value-type", "boolean"),
                    ("office:boolean-value", value.as_str()),
                ],
            )?;
            value
        }
        Cell::Date(ts) => {
            let value = ts.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
            part.open(
                "table:table-cell",
                &[
                    ("table:style-name", DATE_CELL_STYLE),
                    ("office:value-type", "date"),
                    ("office:date-value", value.as_str()),
                ],
            )?;
            format_timestamp(ts)
        }
    };

    part.element("text:p", &[], &display)?;
    part.close("table:table-cell")
}

/// Write paragraph text so ODF whitespace collapsing cannot alter it.
///
/// A single space between two ordinary characters is kept literal; every
/// other space becomes `<text:s text:c="n"/>`. Tabs and newlines become
/// `<text:tab/>` and `<text:line-break/>`.
fn write_paragraph_text(part: &mut XmlPart, text: &str) -> Result<(), EncodeError> {
    let mut run = String::new();
    let mut chars = text.chars().peekable();
    let mut after_ordinary = false;

    while let Some(ch) = chars.next() {
        match ch {
            ' ' => {
                let mut spaces = 1usize;
                while chars.peek() == Some(&' ') {
                    chars.next();
                    spaces += 1;
                }
                let ordinary_follows = matches!(chars.peek(), Some(&c) if c != '\t' && c != '\n');
                if after_ordinary && ordinary_follows {
                    run.push(' ');
                    spaces -= 1;
                }
                if spaces > 0 {
                    flush_run(part, &mut run)?;
                    let count = spaces.to_string();
                    part.empty("text:s", &[("text:c", count.as_str())])?;
                }
                after_ordinary = false;
            }
            '\t' => {
                flush_run(part, &mut run)?;
                part.empty("text:tab", &[])?;
                after_ordinary = false;
            }
            '\n' => {
                flush_run(part, &mut run)?;
                part.empty("text:line-break", &[])?;
                after_ordinary = false;
            }
            _ => {
                run.push(ch);
                after_ordinary = true;
            }
        }
    }

    flush_run(part, &mut run)
}

fn flush_run(part: &mut XmlPart, run: &mut String) -> Result<(), EncodeError> {
    if !run.is_empty() {
        part.text(run)?;
        run.clear();
    }
    Ok(())
}
