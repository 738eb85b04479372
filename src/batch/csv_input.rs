//! Upload checks and CSV parsing.
//!
//! Both run before any row is processed; a failure here rejects the whole
//! request.

use csv::{ReaderBuilder, Trim};

use crate::error::{PaystubError, PaystubResult};
use crate::models::RawRow;

/// Largest accepted upload: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Rejects uploads whose name does not end in `.csv` (any case).
pub fn check_file_name(filename: &str) -> PaystubResult<()> {
    if filename.to_ascii_lowercase().ends_with(".csv") {
        Ok(())
    } else {
        Err(PaystubError::UnsupportedFileType {
            filename: filename.to_string(),
        })
    }
}

/// Rejects uploads larger than [`MAX_UPLOAD_BYTES`].
pub fn check_file_size(size: usize) -> PaystubResult<()> {
    if size > MAX_UPLOAD_BYTES {
        Err(PaystubError::FileTooLarge {
            max_bytes: MAX_UPLOAD_BYTES,
        })
    } else {
        Ok(())
    }
}

/// Parses a CSV document with a header row into raw rows.
///
/// Cells are trimmed and empty cells become `None`. A row shorter than the
/// header is padded with `None`, so its missing fields surface as row-level
/// validation errors. A row longer than the header, or an undecodable
/// record anywhere, rejects the upload as a unit.
///
/// # Example
///
/// ```
/// use paystub_mailer::batch::parse_rows;
///
/// let rows = parse_rows(b"full_name,email,position\nJohn Doe,\n").unwrap();
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0]["full_name"].as_deref(), Some("John Doe"));
/// assert_eq!(rows[0]["email"], None);
/// assert_eq!(rows[0]["position"], None);
/// ```
pub fn parse_rows(bytes: &[u8]) -> PaystubResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(bytes);

    let headers = reader.headers().map_err(invalid_csv)?.clone();
    if headers.iter().all(str::is_empty) {
        return Err(PaystubError::InvalidCsv {
            message: "No columns to parse from file".to_string(),
        });
    }

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(invalid_csv)?;
        if record.len() > headers.len() {
            return Err(PaystubError::InvalidCsv {
                message: format!(
                    "Expected {} fields in row {}, saw {}",
                    headers.len(),
                    index + 1,
                    record.len()
                ),
            });
        }

        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = record
                    .get(i)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string);
                (column.to_string(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

fn invalid_csv(e: csv::Error) -> PaystubError {
    PaystubError::InvalidCsv {
        message: e.to_string(),
    }
}
