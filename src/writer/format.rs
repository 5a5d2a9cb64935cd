use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output encodings the exporter can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
    /// One JSON array of objects
    Json,
    /// One JSON object per line
    #[serde(rename = "jsonl", alias = "jsonlines")]
    JsonLines,
    /// OpenDocument spreadsheet
    Ods,
    /// Office Open XML workbook
    Xlsx,
    /// Apache Parquet
    Parquet,
}

impl Format {
    /// Every format, in the order the exporter writes them
    pub const ALL: [Format; 7] = [
        Format::Csv,
        Format::Tsv,
        Format::Json,
        Format::JsonLines,
        Format::Ods,
        Format::Xlsx,
        Format::Parquet,
    ];

    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Tsv => "tsv",
            Format::Json => "json",
            Format::JsonLines => "jsonl",
            Format::Ods => "ods",
            Format::Xlsx => "xlsx",
            Format::Parquet => "parquet",
        }
    }

    /// Whether the format carries typed values rather than text
    pub fn is_typed(&self) -> bool {
        matches!(self, Format::Parquet)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "tsv" | "tab" => Ok(Format::Tsv),
            "json" => Ok(Format::Json),
            "jsonl" | "jsonlines" | "ndjson" => Ok(Format::JsonLines),
            "ods" => Ok(Format::Ods),
            "xlsx" => Ok(Format::Xlsx),
            "parquet" => Ok(Format::Parquet),
            _ => Err(format!(
                "Unknown format: {}. Valid options: csv, tsv, json, jsonl, ods, xlsx, parquet",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_are_distinct() {
        let mut extensions: Vec<_> = Format::ALL.iter().map(Format::extension).collect();
        extensions.sort_unstable();
        extensions.dedup();
        assert_eq!(extensions.len(), Format::ALL.len());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("CSV".parse::<Format>(), Ok(Format::Csv));
        assert_eq!("ndjson".parse::<Format>(), Ok(Format::JsonLines));
        assert_eq!("jsonl".parse::<Format>(), Ok(Format::JsonLines));
        assert!("xls".parse::<Format>().is_err());

        for format in Format::ALL {
            assert_eq!(format.to_string().parse::<Format>(), Ok(format));
        }
    }

    #[test]
    fn test_serde_names_match_extensions() {
        for format in Format::ALL {
            let json = serde_json::to_string(&format).unwrap();
            assert_eq!(json, format!("\"{}\"", format.extension()));
        }
        let parsed: Format = serde_json::from_str("\"jsonlines\"").unwrap();
        assert_eq!(parsed, Format::JsonLines);
    }
}
