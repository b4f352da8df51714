//! Property-based tests for the validation pipeline.
//!
//! Generates small employee tables with repeated employee numbers,
//! shared identity numbers and occasional missing region tags, then
//! checks the aggregation and query invariants over them.

use proptest::prelude::*;
use std::collections::HashSet;

use crate::engine::validate;
use crate::ingest::{ingest, tests::full_row, COL_NAME_ENGLISH};
use crate::models::{EmployeeRecord, RawRow};
use crate::query::{records_in, ReadModel};

prop_compose! {
    fn arb_row()(
        emp in 0u8..6,
        id in 0u8..6,
        region in prop::option::weighted(0.9, prop::sample::select(vec!["North", "South", "East"])),
        name in "[A-Za-z ]{0,8}",
    ) -> RawRow {
        let mut row = full_row(&format!("E{}", emp), &format!("ID{}", id), region.unwrap_or(""));
        row.insert(COL_NAME_ENGLISH.to_string(), name.into());
        row
    }
}

prop_compose! {
    fn arb_records()(rows in prop::collection::vec(arb_row(), 1..40)) -> Vec<EmployeeRecord> {
        ingest(&rows).expect("generated rows carry every required column")
    }
}

proptest! {
    #[test]
    fn validation_is_idempotent(records in arb_records()) {
        prop_assert_eq!(validate(&records), validate(&records));
    }

    #[test]
    fn headcount_is_distinct_employee_numbers(records in arb_records()) {
        let state = validate(&records);
        for row in &state.validation_table {
            let region = records_in(&records, &row.name);
            let distinct: HashSet<_> = region.iter().map(|r| r.employee_number.as_str()).collect();
            prop_assert_eq!(row.count, distinct.len());
            prop_assert!(row.count <= region.len());
        }
    }

    #[test]
    fn regions_partition_the_records(records in arb_records()) {
        let state = validate(&records);
        let mut seen: Vec<usize> = state
            .validation_table
            .iter()
            .flat_map(|row| records_in(&records, &row.name))
            .chain(records.iter().filter(|r| r.region().is_none()))
            .map(|r| r.row_number)
            .collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (1..=records.len()).collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn findings_gate_the_read_model(records in arb_records()) {
        let state = validate(&records);
        let untagged = records.iter().any(|r| r.region().is_none());
        prop_assert_eq!(state.is_valid, !untagged);
        prop_assert_eq!(state.is_valid, state.errors.is_empty());
        prop_assert_eq!(ReadModel::new(&records, &state).is_ok(), state.is_valid);
        prop_assert_eq!(state.total_regions, state.regions.len());
        prop_assert_eq!(state.total_regions, state.validation_table.len());
    }

    #[test]
    fn search_never_adds_records(records in arb_records(), term in "[A-Za-z0-9]{1,3}") {
        let state = validate(&records);
        if let Ok(model) = ReadModel::new(&records, &state) {
            for row in &state.validation_table {
                let region: Vec<usize> = model.records_for_region(&row.name).iter().map(|r| r.row_number).collect();
                let hits: Vec<usize> = model.search_within_region(&row.name, &term).iter().map(|r| r.row_number).collect();
                let mut rest = region.iter();
                prop_assert!(hits.iter().all(|hit| rest.any(|r| r == hit)));
            }
        }
    }
}
