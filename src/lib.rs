//! Payroll paystub mailer.
//!
//! This crate turns an uploaded payroll CSV into one localized PDF paystub
//! per employee, emails each paystub to its employee, and reports per-row
//! failures without aborting the batch.

#![warn(missing_docs)]

pub mod api;
pub mod batch;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod paystub;
pub mod validation;
