//! HTTP API module for the paystub mailer.
//!
//! This module provides the health endpoint and the basic-auth protected
//! `POST /process` upload endpoint.

mod auth;
mod handlers;
mod request;
mod response;
mod state;

pub use auth::basic_credentials;
pub use handlers::{HEALTH_GREETING, create_router};
pub use request::{ProcessParams, ProcessUpload, parse_bool, read_upload};
pub use response::{ApiError, ApiErrorResponse, ProcessResponse};
pub use state::AppState;
