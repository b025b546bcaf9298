use serde::{Deserialize, Serialize};

use super::token::FieldError;

/// Error response
///
/// `code` carries the error variant name (`InvalidInput`, `Upload`, ...).
/// `fields` is only present for form validation failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            fields: Vec::new(),
        }
    }
}
