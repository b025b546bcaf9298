//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across the web tier. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - User/input issues
//!    - [`InvalidInput`](AppError::InvalidInput) → 400 Bad Request
//!    - [`Validation`](AppError::Validation) → 400 Bad Request, with per-field messages
//!    - [`Transaction`](AppError::Transaction) → 400 Bad Request
//!    - [`Decoding`](AppError::Decoding) → 400 Bad Request
//!
//! 2. **Upstream Errors** (502) - External collaborators failed
//!    - [`Rpc`](AppError::Rpc) → Solana RPC node
//!    - [`Upload`](AppError::Upload) → pinning service
//!
//! 3. **Server Errors** (500)
//!    - [`Encoding`](AppError::Encoding), [`Internal`](AppError::Internal)
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn parse_owner(addr: &str) -> Result<String> {
//!     if addr.len() < 32 {
//!         return Err(AppError::InvalidInput(
//!             "Owner must be a base58 public key".to_string()
//!         ));
//!     }
//!     Ok(addr.to_string())
//! }
//! ```

use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use shared::{ErrorResponse, FieldError};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Solana RPC client error (network, rate limit, node issues).
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Transaction error (building, signature verification, simulation, submission).
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Data encoding error (base64, bincode serialization).
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Data decoding error on user-provided payloads.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Token form failed validation; every failing field is listed.
    #[error("Validation failed: {}", summarize(.0))]
    Validation(Vec<FieldError>),

    /// Pinning service upload failed.
    #[error("Upload error: {0}")]
    Upload(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_)
            | AppError::Validation(_)
            | AppError::Transaction(_)
            | AppError::Decoding(_) => StatusCode::BAD_REQUEST,
            AppError::Rpc(_) | AppError::Upload(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) | AppError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) | AppError::Transaction(msg) | AppError::Decoding(msg) => msg.clone(),
            AppError::Validation(fields) if fields.iter().any(FieldError::is_missing) => {
                "Please fill all the fields!".to_string()
            }
            AppError::Validation(_) => "Please check the highlighted fields".to_string(),
            AppError::Upload(_) => "Failed to upload to the pinning service".to_string(),
            AppError::Rpc(_) => "Service temporarily unavailable".to_string(),
            AppError::Internal(_) | AppError::Encoding(_) => "An internal error occurred".to_string(),
        }
    }

    /// Error variant name, sent as `code`.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Rpc(_) => "Rpc",
            AppError::Transaction(_) => "Transaction",
            AppError::Encoding(_) => "Encoding",
            AppError::Decoding(_) => "Decoding",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Validation(_) => "Validation",
            AppError::Upload(_) => "Upload",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match status {
            StatusCode::BAD_REQUEST => {
                tracing::debug!("Client error: {}", self);
            }
            StatusCode::BAD_GATEWAY | StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Server error: {}", self);
            }
            _ => {
                tracing::warn!("Unexpected error: {}", self);
            }
        }

        let mut body = ErrorResponse::new(self.user_message(), self.code());
        if let AppError::Validation(fields) = self {
            body.fields = fields;
        }

        (status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::TokenField;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidInput("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Upload("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Rpc("x".into()).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Internal("x".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_internal_message_hidden() {
        let err = AppError::Internal("db password leaked".into());
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[test]
    fn test_validation_display_lists_fields() {
        let err = AppError::Validation(vec![
            FieldError::new(TokenField::Name, "Name cannot be empty"),
            FieldError::new(TokenField::Amount, "Amount must be greater than 0"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: Name cannot be empty; Amount must be greater than 0"
        );
    }

    #[test]
    fn test_validation_message_depends_on_missing_fields() {
        let missing = AppError::Validation(vec![
            FieldError::new(TokenField::Image, "Image must be at most 5242880 bytes"),
            FieldError::missing(TokenField::Name),
        ]);
        assert_eq!(missing.user_message(), "Please fill all the fields!");

        let oversized = AppError::Validation(vec![FieldError::new(
            TokenField::Image,
            "Image must be at most 5242880 bytes",
        )]);
        assert_eq!(oversized.user_message(), "Please check the highlighted fields");
    }

    #[tokio::test]
    async fn test_validation_response_body() {
        let err = AppError::Validation(vec![FieldError::new(TokenField::Symbol, "Symbol cannot be empty")]);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.code, "Validation");
        assert_eq!(parsed.fields.len(), 1);
        assert_eq!(parsed.fields[0].field, TokenField::Symbol);
    }
}
