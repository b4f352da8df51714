//! Plain-text views.
//!
//! Renders the validation summary, the dashboard and the regional
//! ledger from the read-model.  Each view implements `Display`;
//! rendering never mutates the dataset and printing the result is left
//! to the caller.

use crate::models::{EmployeeRecord, ValidationState};
use crate::query::ReadModel;
use chrono::{DateTime, Local};
use std::fmt;
use uuid::Uuid;

const RULE: &str = "------------------------------------------------------------";

/// Reference and timestamp stamped on a printed ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub reference: String,
    pub generated_at: DateTime<Local>,
}

impl ReportHeader {
    /// A fresh `REG-XXXXXX` reference stamped with the current time.
    pub fn new() -> Self {
        let id = Uuid::new_v4().simple().to_string();
        Self {
            reference: format!("REG-{}", id[..6].to_uppercase()),
            generated_at: Local::now(),
        }
    }
}

impl Default for ReportHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Region count, numbered validation table and findings.
pub struct ValidationView<'a>(pub &'a ValidationState);

impl fmt::Display for ValidationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let validation = self.0;
        writeln!(f, "OPERATIONAL REFERENCE CHECK")?;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "Operational regions in the dataset: {} (reference column: SourceSheet)",
            validation.total_regions
        )?;
        writeln!(f)?;
        writeln!(f, "{:>4}  {:<32} {:>10}  {}", "#", "Region", "Employees", "Status")?;
        for (idx, row) in validation.validation_table.iter().enumerate() {
            writeln!(f, "{:>4}  {:<32} {:>10}  Verified", idx + 1, row.name, row.count)?;
        }
        writeln!(f)?;
        if validation.errors.is_empty() {
            return writeln!(f, "Reference approved: dashboard and report are available.");
        }
        writeln!(f, "WARNING: values not linked to any approved region")?;
        for error in &validation.errors {
            writeln!(f, "  - {}", error)?;
        }
        writeln!(
            f,
            "Review the records missing a region name (SourceSheet) and upload the file again."
        )
    }
}

/// Workforce KPIs, top nationalities and the regional table.
pub struct DashboardView<'a, 'm>(pub &'m ReadModel<'a>);

impl fmt::Display for DashboardView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let kpis = model.global_kpis();
        writeln!(f, "OPERATIONAL & REGULATORY DASHBOARD")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Total workforce (IDs): {}", kpis.distinct_identifier_count)?;
        writeln!(f, "Verified regions:      {}", kpis.total_regions)?;
        writeln!(f, "Staff avg / region:    {}", kpis.average_display())?;
        writeln!(f, "Active entities:       {}", kpis.company_count)?;
        writeln!(f)?;
        writeln!(f, "Top nationalities")?;
        for nationality in &kpis.top_nationalities {
            writeln!(f, "  {:<28} {:>6}", nationality.name, nationality.count)?;
        }
        writeln!(f)?;
        writeln!(f, "{:<36} {:>14}  {}", "Verified operational region", "Identity count", "Status")?;
        for row in &model.validation().validation_table {
            writeln!(f, "{:<36} {:>14}  Verified", row.name, row.count)?;
        }
        Ok(())
    }
}

fn ledger_line(f: &mut fmt::Formatter<'_>, record: &EmployeeRecord) -> fmt::Result {
    let location = if record.location.is_empty() {
        "General Area"
    } else {
        record.location.as_str()
    };
    writeln!(
        f,
        "{:<8} {:<28} {:<14} {:<14} {:<20} {:<20} {}",
        record.employee_number,
        record.name_english,
        record.nationality,
        record.identity_number.as_deref().unwrap_or("N/A"),
        record.position,
        location,
        record.company
    )
}

/// Ledger of one region, filtered by a search term as in
/// [`ReadModel::search_within_region`].
pub struct LedgerView<'a, 'm> {
    pub model: &'m ReadModel<'a>,
    pub region: &'m str,
    pub term: &'m str,
    pub header: &'m ReportHeader,
}

impl fmt::Display for LedgerView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (region, term, header) = (self.region, self.term, self.header);
        let summary = self.model.region_summary(region);
        let entries = self.model.search_within_region(region, term);
        writeln!(f, "REGIONAL LEDGER: {}", region)?;
        writeln!(
            f,
            "Reference: {}    Generated: {}",
            header.reference,
            header.generated_at.format("%b %-d, %Y, %-I:%M %p")
        )?;
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "Staff: {}    Locations: {}    Supervisory: {}",
            summary.total, summary.locations, summary.supervisors
        )?;
        if !term.is_empty() {
            writeln!(f, "Filter: \"{}\" ({} of {} records)", term, entries.len(), summary.total)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:<8} {:<28} {:<14} {:<14} {:<20} {:<20} {}",
            "Emp#", "Full Name", "Nationality", "Civil ID", "Position", "Location", "Company"
        )?;
        if entries.is_empty() {
            writeln!(f, "No matching records.")?;
        }
        for record in &entries {
            ledger_line(f, record)?;
        }
        writeln!(f, "{}", RULE)?;
        writeln!(
            f,
            "REGULATORY CLEARANCE VERIFIED | {} | LOG: {}",
            region, header.reference
        )
    }
}

pub fn render_validation(validation: &ValidationState) -> String {
    ValidationView(validation).to_string()
}

pub fn render_dashboard(model: &ReadModel<'_>) -> String {
    DashboardView(model).to_string()
}

pub fn render_ledger(model: &ReadModel<'_>, region: &str, term: &str, header: &ReportHeader) -> String {
    LedgerView {
        model,
        region,
        term,
        header,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::validate;
    use crate::ingest::{ingest, tests::full_row, COL_IDENTITY_NUMBER, COL_LOCATION};

    fn header() -> ReportHeader {
        ReportHeader {
            reference: "REG-ABC123".into(),
            generated_at: Local::now(),
        }
    }

    #[test]
    fn reference_has_expected_shape() {
        let header = ReportHeader::new();
        assert_eq!(header.reference.len(), 10);
        assert!(header.reference.starts_with("REG-"));
        assert!(header.reference[4..].chars().all(|c| !c.is_ascii_lowercase()));
    }

    #[test]
    fn validation_summary_lists_findings() {
        let records = ingest(&[full_row("1", "A", "North"), full_row("2", "B", "")]).unwrap();
        let text = render_validation(&validate(&records));
        assert!(text.contains("Operational regions in the dataset: 1"));
        assert!(text.contains("North"));
        assert!(text.contains("WARNING"));
    }

    #[test]
    fn valid_summary_renders_through_display() {
        let records = ingest(&[full_row("1", "A", "North"), full_row("2", "B", "South")]).unwrap();
        let state = validate(&records);
        let text = format!("{}", ValidationView(&state));
        assert_eq!(text, render_validation(&state));
        assert!(text.contains("   1  North"));
        assert!(text.contains("   2  South"));
        assert!(text.ends_with("Reference approved: dashboard and report are available.\n"));
    }

    #[test]
    fn dashboard_shows_kpis() {
        let records = ingest(&[full_row("1", "A", "North"), full_row("2", "B", "South")]).unwrap();
        let state = validate(&records);
        let model = ReadModel::new(&records, &state).unwrap();
        let text = render_dashboard(&model);
        assert!(text.contains("Total workforce (IDs): 2"));
        assert!(text.contains("Staff avg / region:    1.0"));
        assert!(text.contains("Kuwaiti"));
    }

    #[test]
    fn ledger_fills_missing_identity_and_location() {
        let mut row = full_row("1", "A", "North");
        row.remove(COL_IDENTITY_NUMBER);
        row.remove(COL_LOCATION);
        let records = ingest(&[full_row("0", "Z", "North"), row]).unwrap();
        let state = validate(&records);
        let model = ReadModel::new(&records, &state).unwrap();
        let text = render_ledger(&model, "North", "", &header());
        assert!(text.contains("N/A"));
        assert!(text.contains("General Area"));
        assert!(text.contains("LOG: REG-ABC123"));
    }

    #[test]
    fn ledger_reports_empty_search() {
        let records = ingest(&[full_row("1", "A", "North")]).unwrap();
        let state = validate(&records);
        let model = ReadModel::new(&records, &state).unwrap();
        let text = render_ledger(&model, "North", "nobody", &header());
        assert!(text.contains("No matching records."));
        assert!(text.contains("(0 of 1 records)"));
    }
}
