//! Spreadsheet decoding
//!
//! Turns the first worksheet of an `.xls`/`.xlsx` workbook into ordered
//! key/value rows. The first non-empty row is the header; every later row
//! becomes one [`DecodedRow`] keyed by those headers.
//!
//! Header rules:
//! - blank header cells become `__EMPTY`, `__EMPTY_1`, ...
//! - repeated header text gets `_1`, `_2`, ... suffixes
//!
//! Cell rules:
//! - empty cells, empty strings and error cells are omitted
//! - whole floats become integers
//! - date cells become their spreadsheet serial number

use calamine::{Data, Range, Reader, Xls, Xlsx};
use serde_json::{Map, Value, json};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

/// One data row: header text → cell value, in column order
pub type DecodedRow = Map<String, Value>;

/// Key given to columns without header text
const EMPTY_HEADER: &str = "__EMPTY";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to open workbook: {0}")]
    Workbook(String),

    #[error("Workbook has no sheets")]
    NoSheets,
}

/// Supported workbook containers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    /// Legacy binary workbook (.xls)
    Xls,
    /// Zipped XML workbook (.xlsx, .xlsm)
    Xlsx,
}

impl SpreadsheetFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, DecodeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "xls" => Ok(Self::Xls),
            "xlsx" | "xlsm" => Ok(Self::Xlsx),
            _ => Err(DecodeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Decode an in-memory workbook
pub fn decode(bytes: &[u8], format: SpreadsheetFormat) -> Result<Vec<DecodedRow>, DecodeError> {
    let cursor = Cursor::new(bytes);
    let range = match format {
        SpreadsheetFormat::Xlsx => Xlsx::new(cursor)
            .map_err(workbook_error)?
            .worksheet_range_at(0)
            .ok_or(DecodeError::NoSheets)?
            .map_err(workbook_error)?,
        SpreadsheetFormat::Xls => Xls::new(cursor)
            .map_err(workbook_error)?
            .worksheet_range_at(0)
            .ok_or(DecodeError::NoSheets)?
            .map_err(workbook_error)?,
    };

    Ok(rows_from_range(&range))
}

/// Read the whole file once, detect its format and decode it
pub fn decode_file(path: impl AsRef<Path>) -> Result<Vec<DecodedRow>, DecodeError> {
    let path = path.as_ref();
    let format = SpreadsheetFormat::from_path(path)?;
    let bytes = std::fs::read(path)?;
    let rows = decode(&bytes, format)?;
    tracing::debug!(file = %path.display(), rows = rows.len(), "Decoded spreadsheet");
    Ok(rows)
}

fn workbook_error(e: impl std::fmt::Display) -> DecodeError {
    DecodeError::Workbook(e.to_string())
}

fn rows_from_range(range: &Range<Data>) -> Vec<DecodedRow> {
    let mut rows = range.rows().skip_while(|row| row.iter().all(is_blank));

    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers = header_keys(header_row);

    rows.filter_map(|row| {
        let record: DecodedRow = headers
            .iter()
            .zip(row.iter())
            .filter_map(|(key, cell)| cell_to_value(cell).map(|value| (key.clone(), value)))
            .collect();
        (!record.is_empty()).then_some(record)
    })
    .collect()
}

/// Build unique keys for the header row
fn header_keys(row: &[Data]) -> Vec<String> {
    let mut used = HashSet::new();

    row.iter()
        .map(|cell| {
            let text = header_text(cell);
            let base = if text.is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                text
            };

            let mut key = base.clone();
            let mut n = 1;
            while used.contains(&key) {
                key = format!("{base}_{n}");
                n += 1;
            }
            used.insert(key.clone());
            key
        })
        .collect()
}

/// Header cells are always rendered as text
fn header_text(cell: &Data) -> String {
    match cell_to_value(cell) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

fn is_blank(cell: &Data) -> bool {
    cell_to_value(cell).is_none()
}

/// Convert a cell to JSON; `None` means the cell is left out of the row
fn cell_to_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(json!(*i)),
        Data::Float(f) => Some(number(*f)),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => Some(number(dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
    }
}

fn number(f: f64) -> Value {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        json!(f as i64)
    } else {
        json!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    fn workbook_bytes(build: impl FnOnce(&mut rust_xlsxwriter::Worksheet)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        build(workbook.add_worksheet());
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_header_and_two_rows() {
        let bytes = workbook_bytes(|ws| {
            for (col, h) in ["name", "position", "level"].iter().enumerate() {
                ws.write_string(0, col as u16, *h).unwrap();
            }
            ws.write_string(1, 0, "Alice").unwrap();
            ws.write_string(1, 1, "Engineer").unwrap();
            ws.write_string(1, 2, "Senior").unwrap();
            ws.write_string(2, 0, "Bob").unwrap();
            ws.write_string(2, 1, "Designer").unwrap();
            ws.write_string(2, 2, "Junior").unwrap();
        });

        let rows = decode(&bytes, SpreadsheetFormat::Xlsx).unwrap();

        assert_eq!(rows.len(), 2);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "position", "level"]);
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[1]["position"], "Designer");
        assert_eq!(rows[1]["level"], "Junior");
    }

    #[test]
    fn test_empty_cells_omitted_and_numbers_kept() {
        let bytes = workbook_bytes(|ws| {
            ws.write_string(0, 0, "name").unwrap();
            ws.write_string(0, 1, "age").unwrap();
            ws.write_string(0, 2, "score").unwrap();
            ws.write_string(1, 0, "Alice").unwrap();
            ws.write_number(1, 1, 31.0).unwrap();
            ws.write_number(1, 2, 7.5).unwrap();
            ws.write_string(2, 0, "Bob").unwrap();
            ws.write_boolean(2, 2, true).unwrap();
        });

        let rows = decode(&bytes, SpreadsheetFormat::Xlsx).unwrap();

        assert_eq!(rows[0]["age"], json!(31));
        assert_eq!(rows[0]["score"], json!(7.5));
        assert!(!rows[1].contains_key("age"));
        assert_eq!(rows[1]["score"], json!(true));
    }

    #[test]
    fn test_blank_and_duplicate_headers() {
        let bytes = workbook_bytes(|ws| {
            ws.write_string(0, 0, "name").unwrap();
            ws.write_string(0, 2, "name").unwrap();
            ws.write_string(0, 4, "name").unwrap();
            for col in 0..5 {
                ws.write_string(1, col, &format!("c{col}")).unwrap();
            }
        });

        let rows = decode(&bytes, SpreadsheetFormat::Xlsx).unwrap();
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["name", "__EMPTY", "name_1", "__EMPTY_1", "name_2"]);
        assert_eq!(rows[0]["name_2"], "c4");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let bytes = workbook_bytes(|ws| {
            ws.write_string(0, 0, "name").unwrap();
            ws.write_string(1, 0, "Alice").unwrap();
            ws.write_string(3, 0, "Bob").unwrap();
        });

        let rows = decode(&bytes, SpreadsheetFormat::Xlsx).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["name"], "Bob");
    }

    #[test]
    fn test_header_only_sheet_yields_no_rows() {
        let bytes = workbook_bytes(|ws| {
            ws.write_string(0, 0, "name").unwrap();
        });
        assert!(decode(&bytes, SpreadsheetFormat::Xlsx).unwrap().is_empty());
    }

    #[test]
    fn test_date_cells_become_serial_numbers() {
        let bytes = workbook_bytes(|ws| {
            let date_format = Format::new().set_num_format("yyyy-mm-dd");
            let joined = ExcelDateTime::from_ymd(2024, 1, 1).unwrap();
            ws.write_string(0, 0, "name").unwrap();
            ws.write_string(0, 1, "joined").unwrap();
            ws.write_string(1, 0, "Alice").unwrap();
            ws.write_datetime_with_format(1, 1, &joined, &date_format)
                .unwrap();
        });

        let rows = decode(&bytes, SpreadsheetFormat::Xlsx).unwrap();
        assert_eq!(rows[0]["joined"], json!(45292));
    }

    #[test]
    fn test_numeric_header_rendered_as_text() {
        let bytes = workbook_bytes(|ws| {
            ws.write_string(0, 0, "name").unwrap();
            ws.write_number(0, 1, 2024.0).unwrap();
            ws.write_string(1, 0, "Alice").unwrap();
            ws.write_number(1, 1, 12.5).unwrap();
        });

        let rows = decode(&bytes, SpreadsheetFormat::Xlsx).unwrap();
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "2024"]);
        assert_eq!(rows[0]["2024"], json!(12.5));
    }

    #[test]
    fn test_error_cells_omitted() {
        assert_eq!(cell_to_value(&Data::Error(CellErrorType::Div0)), None);
        assert_eq!(cell_to_value(&Data::Error(CellErrorType::NA)), None);

        let headers = header_keys(&[
            Data::String("name".into()),
            Data::Error(CellErrorType::Ref),
        ]);
        assert_eq!(headers, vec!["name", "__EMPTY"]);
    }

    #[test]
    fn test_legacy_xls_workbook() {
        let bytes = include_bytes!("../tests/fixtures/staff.xls");

        let rows = decode(bytes, SpreadsheetFormat::Xls).unwrap();

        assert_eq!(rows.len(), 2);
        let keys: Vec<&str> = rows[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "position", "level"]);
        assert_eq!(rows[0]["name"], "Alice");
        assert_eq!(rows[0]["level"], "Senior");
        assert_eq!(rows[1]["position"], "Designer");
    }

    #[test]
    fn test_corrupt_bytes() {
        let result = decode(b"definitely not a workbook", SpreadsheetFormat::Xlsx);
        assert!(matches!(result, Err(DecodeError::Workbook(_))));

        let result = decode(b"definitely not a workbook", SpreadsheetFormat::Xls);
        assert!(matches!(result, Err(DecodeError::Workbook(_))));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            SpreadsheetFormat::from_path(Path::new("staff.XLSX")).unwrap(),
            SpreadsheetFormat::Xlsx
        );
        assert_eq!(
            SpreadsheetFormat::from_path(Path::new("staff.xlsm")).unwrap(),
            SpreadsheetFormat::Xlsx
        );
        assert_eq!(
            SpreadsheetFormat::from_path(Path::new("legacy.xls")).unwrap(),
            SpreadsheetFormat::Xls
        );
        assert!(SpreadsheetFormat::from_path(Path::new("staff.csv")).is_err());
        assert!(SpreadsheetFormat::from_path(Path::new("staff")).is_err());
    }

    #[test]
    fn test_decode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("staff.xlsx");
        let bytes = workbook_bytes(|ws| {
            ws.write_string(0, 0, "name").unwrap();
            ws.write_string(1, 0, "Alice").unwrap();
        });
        std::fs::write(&path, bytes).unwrap();

        let rows = decode_file(&path).unwrap();
        assert_eq!(rows.len(), 1);

        let missing = decode_file(dir.path().join("missing.xlsx"));
        assert!(matches!(missing, Err(DecodeError::Io(_))));
    }
}
