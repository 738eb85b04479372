//! Error types for the paystub mailer.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every fault that can abort a startup or a whole upload. Row-level
//! problems are not faults; they are reported as data (see
//! [`crate::validation::ValidationFailure`] and [`crate::models::RowError`]).

use thiserror::Error;

/// The main error type for the paystub mailer.
///
/// # Example
///
/// ```
/// use paystub_mailer::error::PaystubError;
///
/// let error = PaystubError::MissingSetting {
///     name: "AUTH_USERNAME".to_string(),
/// };
/// assert_eq!(error.to_string(), "Missing required setting: AUTH_USERNAME");
/// ```
#[derive(Debug, Error)]
pub enum PaystubError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A required setting was absent or empty.
    #[error("Missing required setting: {name}")]
    MissingSetting {
        /// The setting's environment variable name.
        name: String,
    },

    /// A setting was present but could not be interpreted.
    #[error("Invalid setting '{name}': {message}")]
    InvalidSetting {
        /// The setting's environment variable name.
        name: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The upload does not carry a CSV file name.
    #[error("Only CSV files are allowed (got '{filename}')")]
    UnsupportedFileType {
        /// The file name supplied by the client.
        filename: String,
    },

    /// The upload exceeds the maximum accepted size.
    #[error("File too large. Max size is {max_bytes} bytes")]
    FileTooLarge {
        /// The configured upper bound in bytes.
        max_bytes: usize,
    },

    /// The request did not contain a `file` part.
    #[error("No file was uploaded")]
    MissingUpload,

    /// The uploaded file is not a readable CSV table.
    #[error("Invalid CSV format: {message}")]
    InvalidCsv {
        /// A description of the parse failure.
        message: String,
    },

    /// A paystub document could not be produced.
    #[error("PDF generation failed: {message}")]
    Render {
        /// A description of the rendering failure.
        message: String,
    },

    /// A rendered paystub could not be written to the output directory.
    #[error("Failed to store '{path}': {message}")]
    Storage {
        /// The target path.
        path: String,
        /// The underlying I/O error text.
        message: String,
    },
}

/// A type alias for Results that return PaystubError.
pub type PaystubResult<T> = Result<T, PaystubError>;
