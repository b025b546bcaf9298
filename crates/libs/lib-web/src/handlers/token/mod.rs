//! # Token Handlers
//!
//! HTTP endpoints for creating an SPL token from the browser form.
//!
//! ## Endpoints
//!
//! - `POST /api/token/prepare` - Validate the form, pin icon and metadata, return a
//!   mint-signed transaction for the wallet to sign
//! - `POST /api/token/submit` - Submit the wallet-signed transaction and wait for confirmation
//!
//! ## Request Examples
//!
//! ```bash
//! curl -X POST http://localhost:3001/api/token/prepare \
//!   -F owner=8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL \
//!   -F name=Gold -F symbol=GLD -F decimals=6 -F amount=1000 \
//!   -F description="A shiny token" \
//!   -F image=@gold.png
//! ```

use crate::services::token::{TokenService, TokenUpload};
use axum::{
    extract::{Multipart, State},
    Json,
};
use lib_core::{AppError, Config, Result};
use lib_pinning::{PinFile, PinningService};
use lib_solana::TokenChain;
use shared::{PrepareMintResponse, SubmitMintRequest, SubmitMintResponse};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Prepare a token mint transaction.
///
/// **Route**: `POST /api/token/prepare` (`multipart/form-data`)
///
/// # Fields
///
/// - `owner` - connected wallet address; pays fees and receives the supply
/// - `name`, `symbol`, `decimals`, `amount`, `description` - form values as typed
/// - `image` - token icon file (JPEG, PNG or WebP)
///
/// # Returns
///
/// Success (200): [`PrepareMintResponse`] with a base64 transaction that still needs
/// the wallet's signature.
///
/// Error (400): `{"error": "Please fill all the fields!", "code": "Validation", "fields": [...]}`
/// when a required field is blank; other field failures say "Please check the highlighted fields".
/// Error (502): Pinning service or RPC failure
#[instrument(skip(config, chain, pinning, multipart))]
pub async fn prepare_token(
    State(config): State<Config>,
    State(chain): State<Arc<dyn TokenChain>>,
    State(pinning): State<Arc<dyn PinningService>>,
    multipart: Multipart,
) -> Result<Json<PrepareMintResponse>> {
    let upload = read_upload(multipart).await?;
    info!("Token prepare request: symbol={}", upload.draft.symbol);

    let service = TokenService::new(chain, pinning, config.max_image_bytes);
    let response = service.prepare(upload).await?;
    Ok(Json(response))
}

/// Submit a wallet-signed token mint transaction.
///
/// **Route**: `POST /api/token/submit`
///
/// # Returns
///
/// Success (200): [`SubmitMintResponse`] with the confirmed signature and an explorer link
/// for the new mint.
///
/// Error (400): Undecodable transaction, wrong mint, missing signatures, or the
/// transaction failed on-chain
#[instrument(skip(config, chain, pinning, payload))]
pub async fn submit_token(
    State(config): State<Config>,
    State(chain): State<Arc<dyn TokenChain>>,
    State(pinning): State<Arc<dyn PinningService>>,
    Json(payload): Json<SubmitMintRequest>,
) -> Result<Json<SubmitMintResponse>> {
    info!("Token submit request: mint={}", payload.mint_address);

    let service = TokenService::new(chain, pinning, config.max_image_bytes);
    let response = service.submit(payload).await?;
    Ok(Json(response))
}

async fn read_upload(mut multipart: Multipart) -> Result<TokenUpload> {
    let mut upload = TokenUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid form data: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "image" {
            let file_name = field.file_name().unwrap_or("image").to_string();
            let content_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Invalid image upload: {}", e.body_text())))?;

            debug!("Received image {} ({}, {} bytes)", file_name, content_type, bytes.len());
            if !bytes.is_empty() {
                upload.image = Some(PinFile {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Invalid form field {}: {}", name, e.body_text())))?;

        match name.as_str() {
            "owner" => upload.owner = value,
            "name" => upload.draft.name = value,
            "symbol" => upload.draft.symbol = value,
            "decimals" => upload.draft.decimals = value,
            "amount" => upload.draft.amount = value,
            "description" => upload.draft.description = value,
            other => debug!("Ignoring unknown form field {}", other),
        }
    }

    Ok(upload)
}

#[cfg(test)]
mod tests;
