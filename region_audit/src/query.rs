//! Read-model queries over a validated dataset.
//!
//! Every view reads the dataset through a [`ReadModel`], which can only
//! be opened over a valid [`ValidationState`].  All queries are pure and
//! borrow from the records they were given.

use crate::error::AuditError;
use crate::models::{EmployeeRecord, ValidationState};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// How many nationalities the dashboard ranks.
pub const TOP_NATIONALITIES: usize = 5;

/// Position keywords that mark a supervisory role.
pub const SUPERVISORY_KEYWORDS: [&str; 3] = ["supervisor", "lead", "manager"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NationalityCount {
    pub name: String,
    pub count: usize,
}

/// Workforce-wide figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalKpis {
    /// Distinct identity numbers across the dataset.  Records without an
    /// identity number share one empty key.
    pub distinct_identifier_count: usize,
    pub company_count: usize,
    pub total_regions: usize,
    /// `distinct_identifier_count / total_regions`; NaN or infinite when
    /// there are no regions.
    pub average_per_region: f64,
    pub top_nationalities: Vec<NationalityCount>,
}

impl GlobalKpis {
    /// The average rounded half-up to one decimal place, or `n/a`.
    pub fn average_display(&self) -> String {
        if self.average_per_region.is_finite() {
            // `{:.1}` alone rounds 1.25 to the even digit.
            format!("{:.1}", (self.average_per_region * 10.0).round() / 10.0)
        } else {
            "n/a".to_string()
        }
    }

    /// JSON form carrying the rendered average next to the raw ratio.
    pub fn to_json(&self) -> Value {
        json!({
            "distinctIdentifierCount": self.distinct_identifier_count,
            "companyCount": self.company_count,
            "totalRegions": self.total_regions,
            "averagePerRegion": self.average_display(),
            "averageRatio": self.average_per_region,
            "topNationalities": self.top_nationalities,
        })
    }
}

/// Figures for the header of a regional ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionSummary {
    pub name: String,
    /// Raw row count, not deduplicated.
    pub total: usize,
    pub locations: usize,
    pub supervisors: usize,
}

pub(crate) fn records_in<'a>(records: &'a [EmployeeRecord], name: &str) -> Vec<&'a EmployeeRecord> {
    records.iter().filter(|r| r.is_in_region(name)).collect()
}

pub(crate) fn matches_term(record: &EmployeeRecord, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);
    contains(record.name_english.as_str())
        || contains(record.employee_number.as_str())
        || record.identity_number.as_deref().is_some_and(contains)
        || contains(record.nationality.as_str())
}

pub(crate) fn is_supervisory(position: &str) -> bool {
    let position = position.to_lowercase();
    SUPERVISORY_KEYWORDS.iter().any(|kw| position.contains(kw))
}

pub(crate) fn compute_kpis(records: &[EmployeeRecord], total_regions: usize) -> GlobalKpis {
    let distinct_identifier_count = records
        .iter()
        .map(|r| r.identity_number.as_deref().unwrap_or(""))
        .collect::<HashSet<_>>()
        .len();
    let company_count = records
        .iter()
        .map(|r| r.company.as_str())
        .collect::<HashSet<_>>()
        .len();

    // Count in first-seen order so the stable sort breaks ties by it.
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let entry = counts.entry(record.nationality.as_str()).or_insert_with(|| {
            order.push(record.nationality.as_str());
            0
        });
        *entry += 1;
    }
    let mut top_nationalities: Vec<NationalityCount> = order
        .into_iter()
        .map(|name| NationalityCount {
            name: name.to_string(),
            count: counts[name],
        })
        .collect();
    top_nationalities.sort_by(|a, b| b.count.cmp(&a.count));
    top_nationalities.truncate(TOP_NATIONALITIES);

    GlobalKpis {
        distinct_identifier_count,
        company_count,
        total_regions,
        average_per_region: distinct_identifier_count as f64 / total_regions as f64,
        top_nationalities,
    }
}

/// Query access to a dataset whose validation passed.
#[derive(Debug, Clone, Copy)]
pub struct ReadModel<'a> {
    records: &'a [EmployeeRecord],
    validation: &'a ValidationState,
}

impl<'a> ReadModel<'a> {
    /// Opens the read-model, refusing datasets with outstanding findings.
    pub fn new(
        records: &'a [EmployeeRecord],
        validation: &'a ValidationState,
    ) -> Result<Self, AuditError> {
        if !validation.is_valid {
            return Err(AuditError::InvalidDataset {
                findings: validation.errors.len(),
            });
        }
        Ok(Self {
            records,
            validation,
        })
    }

    pub fn records(&self) -> &'a [EmployeeRecord] {
        self.records
    }

    pub fn validation(&self) -> &'a ValidationState {
        self.validation
    }

    pub fn global_kpis(&self) -> GlobalKpis {
        compute_kpis(self.records, self.validation.total_regions)
    }

    /// The region a report opens on: the first row of the validation table.
    pub fn default_region(&self) -> Option<&'a str> {
        self.validation
            .validation_table
            .first()
            .map(|row| row.name.as_str())
    }

    /// Records tagged with `name`, in input order.
    pub fn records_for_region(&self, name: &str) -> Vec<&'a EmployeeRecord> {
        records_in(self.records, name)
    }

    /// Records of `name` whose English name, employee number, identity
    /// number or nationality contains `term`, ignoring case.  An empty
    /// term returns the whole region.
    pub fn search_within_region(&self, name: &str, term: &str) -> Vec<&'a EmployeeRecord> {
        let region = self.records_for_region(name);
        if term.is_empty() {
            return region;
        }
        let needle = term.to_lowercase();
        region
            .into_iter()
            .filter(|r| matches_term(r, &needle))
            .collect()
    }

    pub fn supervisory_count(&self, name: &str) -> usize {
        self.records_for_region(name)
            .into_iter()
            .filter(|r| is_supervisory(&r.position))
            .count()
    }

    pub fn distinct_location_count(&self, name: &str) -> usize {
        self.records_for_region(name)
            .into_iter()
            .map(|r| r.location.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn region_summary(&self, name: &str) -> RegionSummary {
        RegionSummary {
            name: name.to_string(),
            total: self.records_for_region(name).len(),
            locations: self.distinct_location_count(name),
            supervisors: self.supervisory_count(name),
        }
    }
}
