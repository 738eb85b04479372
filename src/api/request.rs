//! Request types for the paystub mailer API.
//!
//! This module reads the multipart body of `POST /process` and turns the
//! optional `country`, `company` and `send_emails` parameters into
//! [`BatchOptions`].

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::batch::{BatchOptions, MAX_UPLOAD_BYTES, check_file_name, check_file_size};
use crate::error::PaystubError;

use super::response::ApiErrorResponse;

/// Optional processing parameters, from the query string or form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessParams {
    /// Country code selecting the locale.
    pub country: Option<String>,
    /// Company identifier selecting the logo.
    pub company: Option<String>,
    /// `true`/`false` style flag.
    pub send_emails: Option<String>,
}

impl ProcessParams {
    /// Fills unset values from `fallback`. Values already set win.
    pub fn or(self, fallback: ProcessParams) -> Self {
        Self {
            country: self.country.or(fallback.country),
            company: self.company.or(fallback.company),
            send_emails: self.send_emails.or(fallback.send_emails),
        }
    }

    /// Resolves the parameters against the defaults.
    pub fn into_options(self) -> Result<BatchOptions, ApiErrorResponse> {
        let defaults = BatchOptions::default();

        let send_emails = match self.send_emails {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| ApiErrorResponse::invalid_parameter("send_emails", &value))?,
            None => defaults.send_emails,
        };

        Ok(BatchOptions {
            country: self.country.unwrap_or(defaults.country),
            company: self.company.unwrap_or(defaults.company),
            send_emails,
        })
    }
}

/// The uploaded CSV and any parameters sent as form fields.
#[derive(Debug, Clone)]
pub struct ProcessUpload {
    /// Client-supplied file name.
    pub file_name: String,
    /// Raw file bytes.
    pub contents: Vec<u8>,
    /// Parameters found among the form fields.
    pub fields: ProcessParams,
}

/// Reads the multipart body.
///
/// The file name is checked before any of the file is read, and the size
/// is checked while streaming so an oversized upload is never buffered
/// past the limit.
pub async fn read_upload(mut multipart: Multipart) -> Result<ProcessUpload, ApiErrorResponse> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut fields = ProcessParams::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                check_file_name(&file_name)?;

                let mut contents = Vec::new();
                while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
                    check_file_size(contents.len() + chunk.len())?;
                    contents.extend_from_slice(&chunk);
                }
                upload = Some((file_name, contents));
            }
            "country" => fields.country = Some(field_text(field).await?),
            "company" => fields.company = Some(field_text(field).await?),
            "send_emails" => fields.send_emails = Some(field_text(field).await?),
            _ => {}
        }
    }

    let (file_name, contents) = upload.ok_or(PaystubError::MissingUpload)?;
    Ok(ProcessUpload {
        file_name,
        contents,
        fields,
    })
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiErrorResponse> {
    let text = field.text().await.map_err(multipart_error)?;
    Ok(text.trim().to_string())
}

fn multipart_error(error: MultipartError) -> ApiErrorResponse {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PaystubError::FileTooLarge {
            max_bytes: MAX_UPLOAD_BYTES,
        }
        .into()
    } else {
        ApiErrorResponse::invalid_multipart(error.body_text())
    }
}

/// Parses the boolean spellings accepted for flags.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "t" | "yes" | "y" | "on" => Some(true),
        "false" | "0" | "f" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
