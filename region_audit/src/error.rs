//! Error types for the region audit.
//!
//! Ingestion failures are fatal to a single upload attempt and leave the
//! session untouched.  Missing region tags are not errors; they are
//! reported as findings inside [`crate::models::ValidationState`].

use crate::models::AppStep;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditError {
    #[error("the file is empty or does not contain any valid data")]
    EmptyDataset,

    #[error("the file is missing the following required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    #[error("the file could not be read as a valid spreadsheet: {message}")]
    Decode { message: String },

    #[error("dashboard and report queries are blocked while {findings} validation finding(s) remain")]
    InvalidDataset { findings: usize },

    #[error("no dataset is loaded; upload a file first")]
    NoDataset,

    #[error("the {step} step is not available for the current session")]
    StepUnavailable { step: AppStep },
}

impl AuditError {
    pub fn missing_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MissingColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_lists_every_column() {
        let err = AuditError::missing_columns(["MRN", "ID#"]);
        assert_eq!(
            err.to_string(),
            "the file is missing the following required columns: MRN, ID#"
        );
    }

    #[test]
    fn step_unavailable_names_the_step() {
        let err = AuditError::StepUnavailable {
            step: AppStep::Report,
        };
        assert!(err.to_string().contains("report"));
    }
}
