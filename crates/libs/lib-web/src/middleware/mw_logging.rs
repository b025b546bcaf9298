//! # Request/Response Logging Middleware
//!
//! Structured logging of every HTTP request and response, correlated by the
//! request ID from [`super::mw_req_stamp`].
//!
//! This middleware logs:
//! - Request method, path, query params
//! - Request headers at debug level (sanitized)
//! - Response status, size, duration
//!
//! Bodies are never logged: prepare carries the uploaded icon and submit carries a
//! signed transaction.

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Headers that are redacted in debug logs
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "x-api-key",
];

/// Endpoints whose responses are logged without the size field
const SENSITIVE_ENDPOINTS: &[&str] = &[
    "/api/token/submit",
];

pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());

    let request_id = req
        .extensions()
        .get::<crate::middleware::mw_req_stamp::RequestStamp>()
        .map(|s| s.id.clone())
        .unwrap_or_else(|| "unknown".to_string());

    let is_sensitive = SENSITIVE_ENDPOINTS.iter().any(|ep| path.starts_with(ep));

    let headers: Vec<(String, String)> = req
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            let name_lower = name.as_str().to_lowercase();
            if SENSITIVE_HEADERS.iter().any(|h| name_lower.contains(h)) {
                Some((name.to_string(), "***REDACTED***".to_string()))
            } else {
                value.to_str().ok().map(|v| (name.to_string(), v.to_string()))
            }
        })
        .collect();

    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(';').next().unwrap_or_default().to_string());

    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        query = ?query,
        content_type = ?content_type,
        "[REQUEST] {} {}",
        method,
        path
    );

    debug!(
        request_id = %request_id,
        headers = ?headers,
        "[REQUEST HEADERS]"
    );

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status();
    let status_code = status.as_u16();

    let content_length = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);

    if status.is_success() {
        if is_sensitive {
            info!(
                request_id = %request_id,
                status = status_code,
                duration_ms = duration.as_millis(),
                "[RESPONSE] {} {} -> {} ({}ms)",
                method,
                path,
                status_code,
                duration.as_millis()
            );
        } else {
            info!(
                request_id = %request_id,
                status = status_code,
                duration_ms = duration.as_millis(),
                size_bytes = content_length,
                "[RESPONSE] {} {} -> {} ({}ms, {} bytes)",
                method,
                path,
                status_code,
                duration.as_millis(),
                content_length
            );
        }
    } else if status.is_client_error() {
        warn!(
            request_id = %request_id,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [CLIENT ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    } else if status.is_server_error() {
        error!(
            request_id = %request_id,
            status = status_code,
            duration_ms = duration.as_millis(),
            "[RESPONSE] {} {} -> {} ({}ms) [SERVER ERROR]",
            method,
            path,
            status_code,
            duration.as_millis()
        );
    }

    response
}
