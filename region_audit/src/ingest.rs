//! Row ingestion.
//!
//! Checks a decoded row sequence against the fixed column contract and
//! turns each row into a typed [`EmployeeRecord`].  Only the first row
//! is sampled for the column check; later rows with a ragged shape are
//! accepted and their missing cells read as absent.

use crate::error::AuditError;
use crate::models::{EmployeeRecord, RawRow};
use tracing::{debug, warn};

pub const COL_NAME_ENGLISH: &str = "NAME (ENG)";
pub const COL_NAME_ARABIC: &str = "NAME (AR)";
pub const COL_GENDER: &str = "G";
pub const COL_NATIONALITY: &str = "NATIONALITY";
pub const COL_IDENTITY_NUMBER: &str = "ID#";
pub const COL_EMPLOYEE_NUMBER: &str = "EMP#";
pub const COL_COMPANY: &str = "COMPANY";
pub const COL_POSITION: &str = "POSITION";
pub const COL_MEDICAL_RECORD_NUMBER: &str = "MRN";
pub const COL_LOCATION: &str = "LOCATION";
pub const COL_REGION_TAG: &str = "SourceSheet";

/// Columns every upload must carry, in the order they are reported.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    COL_NAME_ENGLISH,
    COL_NAME_ARABIC,
    COL_GENDER,
    COL_NATIONALITY,
    COL_IDENTITY_NUMBER,
    COL_EMPLOYEE_NUMBER,
    COL_COMPANY,
    COL_POSITION,
    COL_MEDICAL_RECORD_NUMBER,
    COL_LOCATION,
    COL_REGION_TAG,
];

/// Returns the required columns absent from `row`, in contract order.
pub fn missing_columns(row: &RawRow) -> Vec<&'static str> {
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !row.contains_key(*col))
        .collect()
}

/// Verifies the column contract and builds typed records.
///
/// Fails with [`AuditError::EmptyDataset`] when `rows` is empty and with
/// [`AuditError::MissingColumns`] when the first row lacks any required
/// column.  No record is produced on failure.
pub fn ingest(rows: &[RawRow]) -> Result<Vec<EmployeeRecord>, AuditError> {
    let first = rows.first().ok_or(AuditError::EmptyDataset)?;
    let missing = missing_columns(first);
    if !missing.is_empty() {
        warn!(missing = ?missing, "upload rejected: required columns missing");
        return Err(AuditError::missing_columns(missing));
    }
    let records: Vec<EmployeeRecord> = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| to_record(idx + 1, row))
        .collect();
    debug!(rows = records.len(), "rows accepted");
    Ok(records)
}

fn text(row: &RawRow, column: &str) -> Option<String> {
    row.get(column).and_then(|value| value.to_text())
}

fn to_record(row_number: usize, row: &RawRow) -> EmployeeRecord {
    let required = |column: &str| text(row, column).unwrap_or_default();
    EmployeeRecord {
        row_number,
        name_english: required(COL_NAME_ENGLISH),
        name_arabic: required(COL_NAME_ARABIC),
        gender: required(COL_GENDER),
        nationality: required(COL_NATIONALITY),
        identity_number: text(row, COL_IDENTITY_NUMBER),
        employee_number: required(COL_EMPLOYEE_NUMBER),
        company: required(COL_COMPANY),
        position: required(COL_POSITION),
        medical_record_number: text(row, COL_MEDICAL_RECORD_NUMBER),
        location: required(COL_LOCATION),
        region_tag: text(row, COL_REGION_TAG),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::RawValue;

    /// Builds a row carrying every required column.
    pub(crate) fn full_row(emp: &str, id: &str, region: &str) -> RawRow {
        let mut row = RawRow::new();
        row.insert(COL_NAME_ENGLISH.into(), "Sara Ali".into());
        row.insert(COL_NAME_ARABIC.into(), "سارة علي".into());
        row.insert(COL_GENDER.into(), "F".into());
        row.insert(COL_NATIONALITY.into(), "Kuwaiti".into());
        row.insert(COL_IDENTITY_NUMBER.into(), id.into());
        row.insert(COL_EMPLOYEE_NUMBER.into(), emp.into());
        row.insert(COL_COMPANY.into(), "Acme".into());
        row.insert(COL_POSITION.into(), "Technician".into());
        row.insert(COL_MEDICAL_RECORD_NUMBER.into(), "M-1".into());
        row.insert(COL_LOCATION.into(), "Site A".into());
        row.insert(COL_REGION_TAG.into(), region.into());
        row
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(ingest(&[]), Err(AuditError::EmptyDataset));
    }

    #[test]
    fn missing_mrn_is_reported() {
        let mut row = full_row("1", "A", "North");
        row.remove(COL_MEDICAL_RECORD_NUMBER);
        assert_eq!(
            ingest(&[row]),
            Err(AuditError::MissingColumns {
                columns: vec!["MRN".to_string()]
            })
        );
    }

    #[test]
    fn only_the_first_row_is_sampled() {
        let mut ragged = full_row("2", "B", "North");
        ragged.remove(COL_MEDICAL_RECORD_NUMBER);
        ragged.remove(COL_IDENTITY_NUMBER);
        let records = ingest(&[full_row("1", "A", "North"), ragged]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].identity_number, None);
        assert_eq!(records[1].medical_record_number, None);
    }

    #[test]
    fn numeric_cells_are_stringified() {
        let mut row = full_row("x", "x", "North");
        row.insert(COL_EMPLOYEE_NUMBER.into(), RawValue::Number(1042.0));
        row.insert(COL_IDENTITY_NUMBER.into(), RawValue::Number(2.5));
        let records = ingest(&[row]).unwrap();
        assert_eq!(records[0].employee_number, "1042");
        assert_eq!(records[0].identity_number.as_deref(), Some("2.5"));
    }

    #[test]
    fn blank_region_tag_becomes_absent() {
        let records = ingest(&[full_row("1", "A", "")]).unwrap();
        assert_eq!(records[0].region_tag, None);
        assert_eq!(records[0].row_number, 1);
    }
}
