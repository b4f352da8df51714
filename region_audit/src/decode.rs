//! Spreadsheet decoding.
//!
//! Turns an uploaded CSV, XLSX, XLS or ODS file into the ordered row
//! sequence consumed by [`crate::ingest`].  The first row of the sheet
//! holds the column headers.  Blank cells are left out of the row map
//! and rows without any value are skipped, so a blank required cell in
//! the first data row is reported as a missing column.

use crate::error::AuditError;
use crate::models::{RawRow, RawValue};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Supported upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Workbook, // XLSX/XLSM/XLS/ODS
}

impl SheetFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Reads and decodes the file at `path`.
pub fn decode_file(path: &Path, sheet: Option<&str>) -> Result<Vec<RawRow>, AuditError> {
    let data = std::fs::read(path)
        .map_err(|e| AuditError::decode(format!("{}: {}", path.display(), e)))?;
    decode_bytes(&path.to_string_lossy(), &data, sheet)
}

/// Decodes `data`, choosing the format from the extension of `filename`.
///
/// `sheet` selects a worksheet by name; workbooks otherwise use their
/// first sheet.  It is ignored for CSV input.
pub fn decode_bytes(
    filename: &str,
    data: &[u8],
    sheet: Option<&str>,
) -> Result<Vec<RawRow>, AuditError> {
    let format = SheetFormat::from_extension(Path::new(filename))
        .ok_or_else(|| AuditError::decode(format!("unsupported file type: {}", filename)))?;
    let rows = match format {
        SheetFormat::Csv => decode_csv(data)?,
        SheetFormat::Workbook => decode_workbook(data, sheet)?,
    };
    debug!(file = filename, rows = rows.len(), "file decoded");
    Ok(rows)
}

fn decode_csv(data: &[u8]) -> Result<Vec<RawRow>, AuditError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(data);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AuditError::decode(format!("failed to read CSV headers: {}", e)))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result
            .map_err(|e| AuditError::decode(format!("row {}: {}", idx + 2, e)))?;
        let row = collect_row(
            &headers,
            record.iter().map(|field| RawValue::Text(field.to_string())),
        );
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

fn decode_workbook(data: &[u8], sheet: Option<&str>) -> Result<Vec<RawRow>, AuditError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(data))
        .map_err(|e| AuditError::decode(format!("failed to open workbook: {}", e)))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| AuditError::decode("workbook contains no sheets"))?,
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| AuditError::decode(format!("failed to read sheet '{}': {}", sheet_name, e)))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(header) => header.iter().map(|cell| cell.to_string().trim().to_string()).collect(),
        None => return Ok(Vec::new()),
    };

    Ok(rows_iter
        .map(|row| collect_row(&headers, row.iter().map(cell_value)))
        .filter(|row| !row.is_empty())
        .collect())
}

fn cell_value(cell: &Data) -> RawValue {
    match cell {
        Data::Empty => RawValue::Empty,
        Data::String(s) => RawValue::Text(s.clone()),
        Data::Float(f) => RawValue::Number(*f),
        Data::Int(i) => RawValue::Number(*i as f64),
        Data::Bool(b) => RawValue::Bool(*b),
        other => RawValue::Text(other.to_string()),
    }
}

/// Pairs cells with their headers, dropping blank cells and cells under
/// a blank header.
fn collect_row(headers: &[String], cells: impl Iterator<Item = RawValue>) -> RawRow {
    headers
        .iter()
        .zip(cells)
        .filter(|(header, value)| !header.is_empty() && !value.is_blank())
        .map(|(header, value)| (header.clone(), value))
        .collect()
}
