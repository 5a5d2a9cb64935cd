use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use zip::{CompressionMethod, ZipArchive};

use crate::writer::{output_path, Format, ODS_MIMETYPE};

use super::{ValidationCheck, ValidationError, ValidationReport};

const XLSX_PARTS: [&str; 6] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "xl/workbook.xml",
    "xl/_rels/workbook.xml.rels",
    "xl/styles.xml",
    "xl/worksheets/sheet1.xml",
];

const ODS_PARTS: [&str; 3] = ["META-INF/manifest.xml", "content.xml", "styles.xml"];

/// Step 1: every expected file exists. Returns the files that do.
pub(crate) fn check_files_present(
    dir: &Path,
    base_name: &str,
    report: &mut ValidationReport,
) -> Vec<(Format, PathBuf)> {
    let mut present = Vec::new();

    for format in Format::ALL {
        let path = output_path(dir, base_name, format);
        let name = format!("{} file exists", format);
        if path.is_file() {
            report.add_check(ValidationCheck::ok(name));
            present.push((format, path));
        } else {
            report.add_check(ValidationCheck::failed(name, format!("Missing {}", path.display())));
        }
    }

    present
}

/// Step 2: spreadsheet containers carry their required parts
pub(crate) fn check_containers(files: &[(Format, PathBuf)], report: &mut ValidationReport) {
    for (format, path) in files {
        let result = match format {
            Format::Ods => check_ods_container(path),
            Format::Xlsx => check_xlsx_container(path),
            _ => continue,
        };

        let name = format!("{} container structure", format);
        match result {
            Ok(None) => report.add_check(ValidationCheck::ok(name)),
            Ok(Some(problem)) => report.add_check(ValidationCheck::failed(name, problem)),
            Err(e) => report.add_check(ValidationCheck::failed(name, e.to_string())),
        }
    }
}

fn open_archive(path: &Path) -> Result<ZipArchive<BufReader<File>>, ValidationError> {
    Ok(ZipArchive::new(BufReader::new(File::open(path)?))?)
}

fn missing_parts(archive: &ZipArchive<BufReader<File>>, parts: &[&str]) -> Vec<String> {
    let names: Vec<&str> = archive.file_names().collect();
    parts
        .iter()
        .filter(|part| !names.contains(*part))
        .map(|part| part.to_string())
        .collect()
}

/// `mimetype` must be the first entry, stored, with the ODS media type
fn check_ods_container(path: &Path) -> Result<Option<String>, ValidationError> {
    let mut archive = open_archive(path)?;

    let missing = missing_parts(&archive, &ODS_PARTS);
    if !missing.is_empty() {
        return Ok(Some(format!("Missing parts: {}", missing.join(", "))));
    }

    let mut first = archive.by_index(0)?;
    if first.name() != "mimetype" {
        return Ok(Some(format!("First entry is {:?}, expected \"mimetype\"", first.name())));
    }
    if first.compression() != CompressionMethod::Stored {
        return Ok(Some("mimetype entry is compressed".to_string()));
    }

    let mut mimetype = String::new();
    first.read_to_string(&mut mimetype)?;
    if mimetype != ODS_MIMETYPE {
        return Ok(Some(format!("Unexpected media type {:?}", mimetype)));
    }

    Ok(None)
}

fn check_xlsx_container(path: &Path) -> Result<Option<String>, ValidationError> {
    let archive = open_archive(path)?;
    let missing = missing_parts(&archive, &XLSX_PARTS);
    if missing.is_empty() {
        Ok(None)
    } else {
        Ok(Some(format!("Missing parts: {}", missing.join(", "))))
    }
}
