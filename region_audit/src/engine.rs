//! Validation and aggregation engine.
//!
//! The `engine` module turns a slice of [`EmployeeRecord`]s into a
//! [`ValidationState`]: the distinct region tags in first-seen order,
//! a deduplicated headcount per region, and the integrity findings.
//! Missing region tags are reported as data, never as an error, so
//! this stage cannot fail.

use crate::models::{EmployeeRecord, RegionReference, RegionValidationRow, ValidationState};
use std::collections::HashSet;
use tracing::{debug, info};

/// Distinct non-empty region tags in first-seen order.
pub fn distinct_regions(records: &[EmployeeRecord]) -> Vec<&str> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(EmployeeRecord::region)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Number of distinct employee numbers among the records of `region`.
///
/// Employee numbers are compared as exact strings; `E1` and `e1` are
/// different employees.
pub fn region_headcount(records: &[EmployeeRecord], region: &str) -> usize {
    records
        .iter()
        .filter(|r| r.is_in_region(region))
        .map(|r| r.employee_number.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Diagnostic recorded when `count` records carry no region tag.
pub fn missing_region_message(count: usize) -> String {
    format!(
        "{} employee record(s) found without an approved operational region (SourceSheet).",
        count
    )
}

/// Validates a dataset and builds its per-region headcount table.
pub fn validate(records: &[EmployeeRecord]) -> ValidationState {
    let names = distinct_regions(records);

    let regions: Vec<RegionReference> = names
        .iter()
        .enumerate()
        .map(|(idx, name)| RegionReference {
            id: idx + 1,
            name: name.to_string(),
        })
        .collect();

    let validation_table: Vec<RegionValidationRow> = names
        .iter()
        .map(|name| {
            let count = region_headcount(records, name);
            debug!(region = %name, count, "region headcount");
            RegionValidationRow {
                name: name.to_string(),
                count,
            }
        })
        .collect();

    let mut errors = Vec::new();
    let untagged = records.iter().filter(|r| r.region().is_none()).count();
    if untagged > 0 {
        errors.push(missing_region_message(untagged));
    }

    let state = ValidationState {
        is_valid: errors.is_empty(),
        total_regions: regions.len(),
        regions,
        validation_table,
        errors,
    };
    info!(
        records = records.len(),
        regions = state.total_regions,
        untagged,
        valid = state.is_valid,
        "dataset validated"
    );
    state
}
