//! Core data models for the paystub mailer.
//!
//! This module contains the domain models shared by the validator, the
//! renderer, the notifier and the batch orchestrator.

mod outcome;
mod payroll_record;

pub use outcome::{
    BatchReport, BatchStatus, DeliveryStatus, EmailResult, ErrorCategory, GeneratedFile,
    RowError, RowOutcome,
};
pub use payroll_record::{PayrollRecord, RawRow};
