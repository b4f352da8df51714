//! Region Audit library crate.
//!
//! This crate validates employee spreadsheets against their
//! operational-region tags and exposes the resulting headcount table
//! and workforce queries as reusable modules.  External applications
//! may depend on the `region_audit` crate and drive a
//! [`session::Session`] directly, or call `ingest::ingest`,
//! `engine::validate` and `query::ReadModel` one stage at a time.

pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod query;
pub mod report;
pub mod session;

#[cfg(test)]
mod property_tests;

pub use error::AuditError;
pub use models::{EmployeeRecord, RawRow, RawValue, ValidationState};
pub use session::Session;
