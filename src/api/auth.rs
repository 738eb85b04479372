//! HTTP basic authentication.
//!
//! One credential pair from the settings guards every protected route.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::warn;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// Rejects requests without matching basic-auth credentials.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = basic_credentials(request.headers())
        .is_some_and(|(username, password)| state.settings().auth.matches(&username, &password));

    if authorized {
        next.run(request).await
    } else {
        warn!(path = %request.uri().path(), "Rejected request with invalid credentials");
        ApiErrorResponse::unauthorized().into_response()
    }
}

/// Extracts the `user:password` pair from an `Authorization: Basic` header.
pub fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_decodes_basic_credentials() {
        let encoded = STANDARD.encode("admin:s3cr:et");
        let credentials = basic_credentials(&headers(&format!("Basic {}", encoded)));
        assert_eq!(
            credentials,
            Some(("admin".to_string(), "s3cr:et".to_string()))
        );
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let encoded = STANDARD.encode("admin:secret");
        assert!(basic_credentials(&headers(&format!("basic {}", encoded))).is_some());
    }

    #[test]
    fn test_rejects_other_schemes_and_garbage() {
        assert_eq!(basic_credentials(&HeaderMap::new()), None);
        assert_eq!(basic_credentials(&headers("Bearer abc")), None);
        assert_eq!(basic_credentials(&headers("Basic !!!")), None);
        let no_colon = STANDARD.encode("adminsecret");
        assert_eq!(basic_credentials(&headers(&format!("Basic {}", no_colon))), None);
    }
}
