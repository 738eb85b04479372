//! Per-row outcomes and the aggregate batch report.
//!
//! The orchestrator records one [`RowOutcome`] per CSV row, in row order,
//! and derives every count in [`BatchReport`] from that sequence.

use serde::{Deserialize, Serialize};

use super::RawRow;

/// Category tag attached to a row-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// The row could not be turned into a payroll record.
    Validation,
    /// The paystub document could not be produced or stored.
    PdfGeneration,
}

/// Whether an email was handed to the mail transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The transport accepted the message.
    Success,
    /// The message was not sent.
    Failed,
}

/// A row-level error as reported to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// One-based data row number (the header is not counted).
    pub row: usize,
    /// The raw cells, when the failure happened before a record existed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<RawRow>,
    /// Human-readable error text.
    pub error: String,
    /// Category tag.
    #[serde(rename = "type")]
    pub category: ErrorCategory,
}

/// A paystub written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Employee's full name.
    pub employee: String,
    /// Stored file path.
    pub file: String,
    /// Employee's email address.
    pub email: String,
}

/// The delivery result for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailResult {
    /// Employee's full name.
    pub employee: String,
    /// Destination address.
    pub email: String,
    /// Success or failure.
    pub status: DeliveryStatus,
    /// Human-readable detail.
    pub message: String,
}

/// What happened to one CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The row failed validation and went no further.
    Rejected {
        /// One-based data row number.
        row: usize,
        /// The raw cells.
        data: RawRow,
        /// Why validation failed.
        reason: String,
    },
    /// The row was valid but its paystub could not be produced.
    RenderFailed {
        /// One-based data row number.
        row: usize,
        /// Employee's full name.
        employee: String,
        /// Why rendering failed.
        reason: String,
    },
    /// A paystub was stored; delivery may or may not have been attempted.
    Completed {
        /// One-based data row number.
        row: usize,
        /// The stored paystub.
        file: GeneratedFile,
        /// Delivery result, or `None` when emailing was disabled.
        delivery: Option<EmailResult>,
    },
}

impl RowOutcome {
    /// True if the row produced a valid payroll record.
    pub fn is_valid(&self) -> bool {
        !matches!(self, RowOutcome::Rejected { .. })
    }

    /// The caller-facing error for this row, if any.
    ///
    /// Delivery failures are not row errors; they only show up in
    /// [`BatchReport::email_results`].
    pub fn error(&self) -> Option<RowError> {
        match self {
            RowOutcome::Rejected { row, data, reason } => Some(RowError {
                row: *row,
                data: Some(data.clone()),
                error: reason.clone(),
                category: ErrorCategory::Validation,
            }),
            RowOutcome::RenderFailed { row, reason, .. } => Some(RowError {
                row: *row,
                data: None,
                error: format!("PDF generation failed: {}", reason),
                category: ErrorCategory::PdfGeneration,
            }),
            RowOutcome::Completed { .. } => None,
        }
    }
}

/// Overall status of a processed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// No row-level errors.
    Success,
    /// At least one row-level error.
    PartialSuccess,
}

/// Aggregate result of processing one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// Number of rows that produced a valid record.
    pub employee_count: usize,
    /// Number of paystubs stored.
    pub generated_paystubs: usize,
    /// Number of emails the transport accepted.
    pub emails_sent: usize,
    /// Row-level errors in row order.
    pub errors: Vec<RowError>,
    /// Every stored paystub, in row order.
    pub generated_files: Vec<GeneratedFile>,
    /// Every delivery attempt, in row order.
    pub email_results: Vec<EmailResult>,
}

impl BatchReport {
    /// Folds row outcomes into a report.
    ///
    /// # Example
    ///
    /// ```
    /// use paystub_mailer::models::{BatchReport, BatchStatus, RawRow, RowOutcome};
    ///
    /// let outcomes = vec![RowOutcome::Rejected {
    ///     row: 1,
    ///     data: RawRow::new(),
    ///     reason: "full_name: field required".to_string(),
    /// }];
    /// let report = BatchReport::from_outcomes(&outcomes);
    /// assert_eq!(report.employee_count, 0);
    /// assert_eq!(report.status(), BatchStatus::PartialSuccess);
    /// ```
    pub fn from_outcomes(outcomes: &[RowOutcome]) -> Self {
        let mut report = BatchReport {
            employee_count: 0,
            generated_paystubs: 0,
            emails_sent: 0,
            errors: Vec::new(),
            generated_files: Vec::new(),
            email_results: Vec::new(),
        };

        for outcome in outcomes {
            if outcome.is_valid() {
                report.employee_count += 1;
            }
            if let Some(error) = outcome.error() {
                report.errors.push(error);
            }
            if let RowOutcome::Completed { file, delivery, .. } = outcome {
                report.generated_paystubs += 1;
                report.generated_files.push(file.clone());
                if let Some(result) = delivery {
                    if result.status == DeliveryStatus::Success {
                        report.emails_sent += 1;
                    }
                    report.email_results.push(result.clone());
                }
            }
        }

        report
    }

    /// `Success` when there are no row-level errors.
    pub fn status(&self) -> BatchStatus {
        if self.errors.is_empty() {
            BatchStatus::Success
        } else {
            BatchStatus::PartialSuccess
        }
    }

    /// Summary line for the response body.
    pub fn message(&self) -> String {
        if self.errors.is_empty() {
            "All records processed successfully".to_string()
        } else {
            format!("Processed with {} errors", self.errors.len())
        }
    }
}
