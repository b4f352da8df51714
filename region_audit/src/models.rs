//! Data models for the region audit.
//!
//! The `models` module defines the raw cell values handed over by the
//! spreadsheet decoder, the typed employee record built from them, and
//! the validation structures produced by the engine.  The validation
//! types derive `Serialize` and `Deserialize` so that they can be
//! printed as JSON or handed to another presentation layer unchanged.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single untyped cell value as produced by a tabular decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl RawValue {
    /// Returns `true` for blank cells and empty text.
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the value as a string, or `None` when the cell is blank.
    pub fn to_text(&self) -> Option<String> {
        if self.is_blank() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            // f64's Display already drops the fractional part of integral
            // values, so `1.0` renders as `1` like a spreadsheet would.
            RawValue::Number(n) => write!(f, "{}", n),
            RawValue::Bool(b) => write!(f, "{}", b),
            RawValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// One decoded row: column header to cell value.  Blank cells are
/// normally omitted by the decoder rather than stored as `Empty`.
pub type RawRow = HashMap<String, RawValue>;

/// Represents one employee row of the uploaded spreadsheet.
///
/// Records are immutable once built by [`crate::ingest`].  Optional
/// columns are `None` when the cell was missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// 1-based position of the row among the data rows of the file.
    pub row_number: usize,
    /// `NAME (ENG)`
    pub name_english: String,
    /// `NAME (AR)`
    pub name_arabic: String,
    /// `G`
    pub gender: String,
    /// `NATIONALITY`
    pub nationality: String,
    /// `ID#`: the civil identity number, used for workforce-size KPIs.
    pub identity_number: Option<String>,
    /// `EMP#`: the business key used to deduplicate regional headcounts.
    pub employee_number: String,
    /// `COMPANY`
    pub company: String,
    /// `POSITION`
    pub position: String,
    /// `MRN`
    pub medical_record_number: Option<String>,
    /// `LOCATION`
    pub location: String,
    /// `SourceSheet`: the operational region this record belongs to.
    pub region_tag: Option<String>,
}

impl EmployeeRecord {
    /// The region tag, if the record carries a non-empty one.
    pub fn region(&self) -> Option<&str> {
        self.region_tag.as_deref().filter(|tag| !tag.is_empty())
    }

    /// Returns `true` when the record belongs to the named region.
    pub fn is_in_region(&self, name: &str) -> bool {
        self.region() == Some(name)
    }
}

/// A distinct region tag observed in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionReference {
    /// 1-based ordinal in first-seen order.
    pub id: usize,
    pub name: String,
}

/// Deduplicated headcount for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionValidationRow {
    pub name: String,
    /// Number of distinct employee numbers tagged with this region.
    pub count: usize,
}

/// The aggregate result of validating a dataset.
///
/// `regions` and `validation_table` share the same ordering (first-seen
/// order of region tags) and the same set of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationState {
    /// `true` exactly when `errors` is empty.
    pub is_valid: bool,
    pub regions: Vec<RegionReference>,
    pub validation_table: Vec<RegionValidationRow>,
    pub total_regions: usize,
    /// Human-readable integrity findings.
    pub errors: Vec<String>,
}

/// The screens of the audit workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppStep {
    /// Choose a file.  Entering this step discards the loaded dataset.
    Upload,
    /// Review the validation table and findings.
    Validation,
    /// Workforce KPIs.  Requires a valid dataset.
    Dashboard,
    /// Per-region ledger.  Requires a valid dataset.
    Report,
}

impl fmt::Display for AppStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppStep::Upload => "upload",
            AppStep::Validation => "validation",
            AppStep::Dashboard => "dashboard",
            AppStep::Report => "report",
        };
        f.write_str(name)
    }
}
