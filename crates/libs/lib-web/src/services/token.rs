//! # Token Service
//!
//! Business logic for creating an SPL token from the browser form.
//!
//! ## Overview
//!
//! Creation is split in two requests so the wallet never leaves the browser:
//!
//! ```text
//! prepare: validate → pin icon → pin metadata JSON → rent + blockhash → build, mint-sign
//! (browser wallet adds the payer signature)
//! submit:  decode → verify mint + signatures → send and confirm → explorer link
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, AppError>`. Common errors:
//! - `AppError::Validation` - One or more form fields are invalid
//! - `AppError::InvalidInput` - Missing or malformed wallet / mint address
//! - `AppError::Upload` - The pinning service rejected an upload
//! - `AppError::Rpc` - Rent or blockhash lookup failed
//! - `AppError::Transaction` - Signed transaction rejected or failed on-chain

use lib_core::{AppError, Result};
use lib_pinning::{PinFile, PinningError, PinningService};
use lib_solana::{
    build_create_token_transaction, decode_transaction, verify_signed_mint_transaction, MintError,
    MintRequest, TokenChain,
};
use shared::{
    explorer_address_url, is_supported_image, FieldError, PrepareMintResponse, SubmitMintRequest,
    SubmitMintResponse, TokenDraft, TokenField, TokenMetadataDocument,
};
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The multipart form, decoded but not yet validated.
#[derive(Debug, Clone, Default)]
pub struct TokenUpload {
    /// Connected wallet address (base58)
    pub owner: String,
    pub draft: TokenDraft,
    pub image: Option<PinFile>,
}

/// Token creation service.
#[derive(Clone)]
pub struct TokenService {
    chain: Arc<dyn TokenChain>,
    pinning: Arc<dyn PinningService>,
    max_image_bytes: usize,
}

impl TokenService {
    pub fn new(chain: Arc<dyn TokenChain>, pinning: Arc<dyn PinningService>, max_image_bytes: usize) -> Self {
        Self {
            chain,
            pinning,
            max_image_bytes,
        }
    }

    /// Validate the form, pin the icon and metadata, and return a mint-signed transaction.
    #[instrument(skip(self, upload), fields(owner = %upload.owner))]
    pub async fn prepare(&self, upload: TokenUpload) -> Result<PrepareMintResponse> {
        let owner = parse_owner(&upload.owner)?;

        let mut errors = Vec::new();
        if let Err(image_error) = self.check_image(upload.image.as_ref()) {
            errors.push(image_error);
        }
        let token = match upload.draft.validate() {
            Ok(token) => Some(token),
            Err(field_errors) => {
                errors.extend(field_errors);
                None
            }
        };
        let (token, image) = match (token, upload.image) {
            (Some(token), Some(image)) if errors.is_empty() => (token, image),
            _ => return Err(AppError::Validation(errors)),
        };

        let image_pin = self.pinning.pin_file(image).await.map_err(upload_error)?;
        debug!("Icon available at {}", image_pin.url);

        let document = TokenMetadataDocument::new(&token, &image_pin.url);
        let document = serde_json::to_value(&document).map_err(|e| AppError::Encoding(e.to_string()))?;
        let metadata_pin = self
            .pinning
            .pin_json(&token.name, &document)
            .await
            .map_err(upload_error)?;

        let rent = self
            .chain
            .mint_rent_exemption()
            .await
            .map_err(|e| AppError::Rpc(e.to_string()))?;
        let blockhash = self
            .chain
            .latest_blockhash()
            .await
            .map_err(|e| AppError::Rpc(e.to_string()))?;

        let mint_keypair = Keypair::new();
        let request = MintRequest {
            payer: owner,
            decimals: token.decimals,
            base_units: token.base_units,
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            uri: metadata_pin.url.clone(),
        };
        let built = build_create_token_transaction(&request, &mint_keypair, rent, blockhash).map_err(mint_error)?;

        info!(
            mint = %built.mint,
            symbol = %token.symbol,
            base_units = token.base_units,
            "🪙 Prepared token mint transaction"
        );

        Ok(PrepareMintResponse {
            transaction: built.encode_base64().map_err(mint_error)?,
            mint_address: built.mint.to_string(),
            associated_token_address: built.associated_token_account.to_string(),
            metadata_address: built.metadata.to_string(),
            metadata_uri: metadata_pin.url,
            image_url: image_pin.url,
        })
    }

    /// Verify a wallet-signed transaction, send it and wait for confirmation.
    #[instrument(skip(self, request), fields(mint = %request.mint_address))]
    pub async fn submit(&self, request: SubmitMintRequest) -> Result<SubmitMintResponse> {
        let mint = Pubkey::from_str(request.mint_address.trim())
            .map_err(|_| AppError::InvalidInput("Invalid mint address".to_string()))?;

        let transaction = decode_transaction(&request.transaction).map_err(mint_error)?;
        verify_signed_mint_transaction(&transaction, &mint).map_err(mint_error)?;

        let signature = self
            .chain
            .send_and_confirm(&transaction)
            .await
            .map_err(|e| AppError::Transaction(e.to_string()))?;

        info!(signature = %signature, mint = %mint, "✅ Token created");

        Ok(SubmitMintResponse {
            signature: signature.to_string(),
            mint_address: mint.to_string(),
            explorer_url: explorer_address_url(&mint.to_string(), self.chain.network().explorer_cluster()),
        })
    }

    fn check_image(&self, image: Option<&PinFile>) -> std::result::Result<(), FieldError> {
        let image = match image {
            Some(image) if !image.bytes.is_empty() => image,
            _ => return Err(FieldError::missing(TokenField::Image)),
        };
        if !is_supported_image(&image.content_type) {
            return Err(FieldError::new(
                TokenField::Image,
                "Image must be a JPEG, PNG or WebP file",
            ));
        }
        if image.bytes.len() > self.max_image_bytes {
            return Err(FieldError::new(
                TokenField::Image,
                format!("Image must be at most {} bytes", self.max_image_bytes),
            ));
        }
        Ok(())
    }
}

fn parse_owner(owner: &str) -> Result<Pubkey> {
    let owner = owner.trim();
    if owner.is_empty() {
        return Err(AppError::InvalidInput("Please connect your wallet".to_string()));
    }
    Pubkey::from_str(owner).map_err(|_| AppError::InvalidInput("Invalid wallet address".to_string()))
}

fn upload_error(err: PinningError) -> AppError {
    AppError::Upload(err.to_string())
}

fn mint_error(err: MintError) -> AppError {
    match err {
        MintError::Metadata(msg) => AppError::InvalidInput(msg),
        MintError::Decoding(msg) => AppError::Decoding(msg),
        MintError::Rejected(msg) => AppError::Transaction(msg),
        MintError::Encoding(msg) => AppError::Encoding(msg),
        MintError::Instruction(msg) | MintError::Signing(msg) => AppError::Internal(msg),
    }
}
