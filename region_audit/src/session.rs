//! Upload session and step navigation.
//!
//! A [`Session`] owns at most one [`Dataset`].  Loading a file replaces
//! the dataset wholesale; it is never patched in place.  Failed uploads
//! leave the previous dataset and step untouched.

use crate::engine::validate;
use crate::error::AuditError;
use crate::ingest::ingest;
use crate::models::{AppStep, EmployeeRecord, RawRow, ValidationState};
use crate::query::ReadModel;
use tracing::info;

/// An ingested file together with its validation result.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<EmployeeRecord>,
    validation: ValidationState,
}

impl Dataset {
    /// Ingests and validates `rows`.
    pub fn from_rows(rows: &[RawRow]) -> Result<Self, AuditError> {
        let records = ingest(rows)?;
        let validation = validate(&records);
        Ok(Self {
            records,
            validation,
        })
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn validation(&self) -> &ValidationState {
        &self.validation
    }

    pub fn read_model(&self) -> Result<ReadModel<'_>, AuditError> {
        ReadModel::new(&self.records, &self.validation)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    step: AppStep,
    dataset: Option<Dataset>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            step: AppStep::Upload,
            dataset: None,
        }
    }

    pub fn step(&self) -> AppStep {
        self.step
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn validation(&self) -> Option<&ValidationState> {
        self.dataset.as_ref().map(Dataset::validation)
    }

    /// Replaces the dataset with `rows` and moves to the validation step.
    pub fn load(&mut self, rows: &[RawRow]) -> Result<&ValidationState, AuditError> {
        let dataset = Dataset::from_rows(rows)?;
        info!(
            records = dataset.records.len(),
            valid = dataset.validation.is_valid,
            "dataset loaded"
        );
        self.step = AppStep::Validation;
        Ok(self.dataset.insert(dataset).validation())
    }

    /// Discards the dataset and returns to the upload step.
    pub fn reset(&mut self) {
        if self.dataset.take().is_some() {
            info!("session reset, dataset discarded");
        }
        self.step = AppStep::Upload;
    }

    /// Whether `step` can be entered from the current state.
    pub fn can_enter(&self, step: AppStep) -> bool {
        match step {
            AppStep::Upload => true,
            AppStep::Validation => self.dataset.is_some(),
            AppStep::Dashboard | AppStep::Report => self
                .validation()
                .is_some_and(|validation| validation.is_valid),
        }
    }

    /// Moves to `step`.  Entering [`AppStep::Upload`] resets the session.
    pub fn navigate(&mut self, step: AppStep) -> Result<(), AuditError> {
        if !self.can_enter(step) {
            return Err(AuditError::StepUnavailable { step });
        }
        if step == AppStep::Upload {
            self.reset();
        } else {
            self.step = step;
        }
        Ok(())
    }

    /// Read-model over the current dataset, for the dashboard and report.
    pub fn read_model(&self) -> Result<ReadModel<'_>, AuditError> {
        match &self.dataset {
            Some(dataset) => dataset.read_model(),
            None => Err(AuditError::NoDataset),
        }
    }
}
