//! Batch processing of payroll uploads.
//!
//! This module checks and parses the uploaded CSV and runs every row
//! through validation, rendering and delivery, collecting one outcome per
//! row into a [`crate::models::BatchReport`].

mod csv_input;
mod orchestrator;

pub use csv_input::{MAX_UPLOAD_BYTES, check_file_name, check_file_size, parse_rows};
pub use orchestrator::{BatchOptions, BatchProcessor, DEFAULT_SEND_INTERVAL};
