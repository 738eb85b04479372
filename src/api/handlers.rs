//! HTTP request handlers for the paystub mailer API.
//!
//! This module contains the router and the handler functions for all API
//! endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State, multipart::MultipartRejection},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::batch::MAX_UPLOAD_BYTES;
use crate::error::PaystubError;

use super::auth::require_basic_auth;
use super::request::{ProcessParams, read_upload};
use super::response::{ApiErrorResponse, ProcessResponse};
use super::state::AppState;

/// Headroom above the file limit for multipart framing and text fields.
const BODY_LIMIT_HEADROOM: usize = 1024 * 1024;

/// Greeting returned by the health endpoint.
pub const HEALTH_GREETING: &str = "Holaaaaaaaaaa AtDev Team!";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/process", post(process_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_basic_auth,
        ));

    Router::new()
        .route("/", get(health_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + BODY_LIMIT_HEADROOM))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handler for GET / endpoint.
async fn health_handler() -> &'static str {
    HEALTH_GREETING
}

/// Handler for POST /process endpoint.
///
/// Reads the uploaded CSV, runs the batch and returns the summary.
async fn process_handler(
    State(state): State<AppState>,
    Query(query): Query<ProcessParams>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll upload");

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(correlation_id = %correlation_id, error = %rejection, "Not a multipart upload");
            return ApiErrorResponse::from(PaystubError::MissingUpload).into_response();
        }
    };

    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(error) => {
            warn!(
                correlation_id = %correlation_id,
                code = %error.error.code,
                error = %error.error.message,
                "Upload rejected"
            );
            return error.into_response();
        }
    };

    let options = match upload.fields.or(query).into_options() {
        Ok(options) => options,
        Err(error) => return error.into_response(),
    };

    let start_time = Instant::now();
    match state.processor().process_csv(&upload.contents, &options).await {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                file = %upload.file_name,
                country = %options.country,
                company = %options.company,
                employee_count = report.employee_count,
                errors = report.errors.len(),
                duration_ms = start_time.elapsed().as_millis(),
                "Payroll upload processed"
            );
            Json(ProcessResponse::from_report(report, state.settings().debug)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                file = %upload.file_name,
                error = %err,
                "Payroll upload failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}
