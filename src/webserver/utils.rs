//! Shared response helpers for route handlers
//!
//! All JSON error bodies follow the shape `{"error": "<message>"}`.
//! Success responses optionally carry a public Cache-Control header whose
//! max-age matches the endpoint's revalidation interval.

use crate::errors::UpstreamError;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// 200 JSON response with a public Cache-Control header
pub fn cached_response<T: Serialize>(data: T, max_age_secs: u32, swr_secs: u32) -> Response {
    let mut response = Json(data).into_response();
    if let Ok(value) = header::HeaderValue::from_str(&cache_control(max_age_secs, swr_secs)) {
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }
    response
}

/// 200 JSON response that must never be cached
pub fn no_store_response<T: Serialize>(data: T) -> Response {
    let mut response = Json(data).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, header::HeaderValue::from_static("no-store"));
    response
}

/// JSON error response with the `{"error": ...}` body
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Error response carrying the status an [`UpstreamError`] maps to
pub fn upstream_error_response(err: &UpstreamError, message: &str) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    error_response(status, message)
}

/// Build a `public, max-age=.., stale-while-revalidate=..` directive
pub fn cache_control(max_age_secs: u32, swr_secs: u32) -> String {
    format!(
        "public, max-age={}, stale-while-revalidate={}",
        max_age_secs, swr_secs
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_control_directive() {
        assert_eq!(
            cache_control(60, 300),
            "public, max-age=60, stale-while-revalidate=300"
        );
    }

    #[test]
    fn test_error_response_shape() {
        let response = error_response(StatusCode::BAD_REQUEST, "Missing id.");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_error_status_passthrough() {
        let response =
            upstream_error_response(&UpstreamError::Status(503), "Failed to fetch prices.");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = upstream_error_response(
            &UpstreamError::Network("down".into()),
            "Failed to fetch prices.",
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
