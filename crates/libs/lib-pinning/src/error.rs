use thiserror::Error;

#[derive(Debug, Error)]
pub enum PinningError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Pinning request failed: {0}")]
    Request(String),

    /// Non-2xx answer; `body` is whatever the API sent back.
    #[error("Pinning service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected pinning response: {0}")]
    Response(String),

    #[error("Invalid upload: {0}")]
    InvalidFile(String),
}

impl From<reqwest::Error> for PinningError {
    fn from(err: reqwest::Error) -> Self {
        PinningError::Request(err.to_string())
    }
}
