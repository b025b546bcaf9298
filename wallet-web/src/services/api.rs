//! Backend API client
//!
//! `POST /api/token/prepare` (multipart) and `POST /api/token/submit` (JSON).

use std::fmt;

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::dto::{
    ErrorResponse, FieldError, PrepareMintResponse, SubmitMintRequest, SubmitMintResponse,
    TokenDraft,
};
use web_sys::{File, FormData};

use crate::utils::constants::API_BASE;

#[derive(Debug, Clone)]
pub enum ApiError {
    /// The request never got a response
    Network(String),
    /// The backend answered with its error envelope
    Rejected { status: u16, body: ErrorResponse },
    /// The response body did not match the expected DTO
    Decode(String),
}

impl ApiError {
    /// Field errors the backend attached to a validation failure.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            ApiError::Rejected { body, .. } => body.fields.clone(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Rejected { status, body } => {
                write!(f, "{} ({}): {}", body.code, status, body.error)
            }
            ApiError::Decode(e) => write!(f, "Server response error: {}", e),
        }
    }
}

fn form_data(owner: &str, draft: &TokenDraft, image: &File) -> Result<FormData, ApiError> {
    let js_err = |e: wasm_bindgen::JsValue| ApiError::Network(format!("{:?}", e));

    let form = FormData::new().map_err(js_err)?;
    form.append_with_str("owner", owner).map_err(js_err)?;
    form.append_with_str("name", &draft.name).map_err(js_err)?;
    form.append_with_str("symbol", &draft.symbol).map_err(js_err)?;
    form.append_with_str("decimals", &draft.decimals).map_err(js_err)?;
    form.append_with_str("amount", &draft.amount).map_err(js_err)?;
    form.append_with_str("description", &draft.description).map_err(js_err)?;
    form.append_with_blob_and_filename("image", image, &image.name())
        .map_err(js_err)?;
    Ok(form)
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    if !response.ok() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        let body = serde_json::from_str::<ErrorResponse>(&text)
            .unwrap_or_else(|_| ErrorResponse::new(text, "Unknown"));
        return Err(ApiError::Rejected { status, body });
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

/// Upload the icon and metadata and get back a mint-signed transaction.
pub async fn prepare_token(
    owner: &str,
    draft: &TokenDraft,
    image: &File,
) -> Result<PrepareMintResponse, ApiError> {
    let form = form_data(owner, draft, image)?;
    let url = format!("{}/api/token/prepare", API_BASE);

    // The browser sets the multipart boundary itself, so no Content-Type here
    let response = Request::post(&url)
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    read_json(response).await
}

/// Broadcast the wallet-signed transaction.
pub async fn submit_token(request: &SubmitMintRequest) -> Result<SubmitMintResponse, ApiError> {
    let url = format!("{}/api/token/submit", API_BASE);

    let response = Request::post(&url)
        .json(request)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    read_json(response).await
}
