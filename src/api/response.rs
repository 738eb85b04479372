//! Response types for the paystub mailer API.
//!
//! This module defines the batch summary body and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PaystubError;
use crate::models::{BatchReport, BatchStatus, EmailResult, GeneratedFile, RowError};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Missing or wrong basic-auth credentials.
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            error: ApiError::new("UNAUTHORIZED", "Invalid credentials"),
        }
    }

    /// A query or form parameter could not be interpreted.
    pub fn invalid_parameter(name: &str, value: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new(
                "INVALID_PARAMETER",
                format!("Invalid value for '{}': '{}'", name, value),
            ),
        }
    }

    /// The multipart body itself was malformed.
    pub fn invalid_multipart(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::new("INVALID_MULTIPART", message),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let unauthorized = self.status == StatusCode::UNAUTHORIZED;
        let mut response = (self.status, Json(self.error)).into_response();
        if unauthorized {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}

impl From<PaystubError> for ApiErrorResponse {
    fn from(error: PaystubError) -> Self {
        match error {
            PaystubError::UnsupportedFileType { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "UNSUPPORTED_FILE_TYPE",
                    "Only CSV files are allowed",
                    error.to_string(),
                ),
            },
            PaystubError::FileTooLarge { .. } => ApiErrorResponse {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                error: ApiError::new("FILE_TOO_LARGE", error.to_string()),
            },
            PaystubError::InvalidCsv { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("INVALID_CSV", error.to_string()),
            },
            PaystubError::MissingUpload => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("MISSING_FILE", error.to_string()),
            },
            other => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INTERNAL_ERROR",
                    "Internal server error",
                    other.to_string(),
                ),
            },
        }
    }
}

/// Body returned by `POST /process`.
///
/// `generated_files` and `email_results` are only present when the server
/// runs in debug mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    /// `success` or `partial_success`.
    pub status: BatchStatus,
    /// Rows that produced a valid record.
    pub employee_count: usize,
    /// Paystubs stored.
    pub generated_paystubs: usize,
    /// Emails accepted by the transport.
    pub emails_sent: usize,
    /// Row-level errors, `null` when there are none.
    pub errors: Option<Vec<RowError>>,
    /// Summary line.
    pub message: String,
    /// Every stored paystub (debug only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_files: Option<Vec<GeneratedFile>>,
    /// Every delivery attempt (debug only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_results: Option<Vec<EmailResult>>,
}

impl ProcessResponse {
    /// Builds the body from a report, including per-row detail when `debug`.
    pub fn from_report(report: BatchReport, debug: bool) -> Self {
        let status = report.status();
        let message = report.message();
        let errors = (!report.errors.is_empty()).then_some(report.errors);

        Self {
            status,
            employee_count: report.employee_count,
            generated_paystubs: report.generated_paystubs,
            emails_sent: report.emails_sent,
            errors,
            message,
            generated_files: debug.then_some(report.generated_files),
            email_results: debug.then_some(report.email_results),
        }
    }
}
