//! Token creation DTOs and the form rules both tiers enforce.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest token name the metadata program accepts (bytes).
pub const MAX_NAME_LENGTH: usize = 32;
/// Longest token symbol the metadata program accepts (bytes).
pub const MAX_SYMBOL_LENGTH: usize = 10;
/// Highest decimal count offered by the form.
pub const MAX_DECIMALS: u8 = 9;

/// Image MIME types the dropzone accepts.
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Whether an uploaded file's content type is an accepted token icon.
pub fn is_supported_image(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    SUPPORTED_IMAGE_TYPES.contains(&essence.as_str())
}

/// Form fields, used to attach validation errors to inputs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TokenField {
    Image,
    Name,
    Symbol,
    Decimals,
    Amount,
    Description,
}

impl TokenField {
    pub fn label(&self) -> &'static str {
        match self {
            TokenField::Image => "Image",
            TokenField::Name => "Name",
            TokenField::Symbol => "Symbol",
            TokenField::Decimals => "Decimals",
            TokenField::Amount => "Amount",
            TokenField::Description => "Description",
        }
    }
}

impl fmt::Display for TokenField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single field validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: TokenField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: TokenField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// A required field left blank.
    pub fn missing(field: TokenField) -> Self {
        Self::new(field, format!("{} cannot be empty", field))
    }

    pub fn is_missing(&self) -> bool {
        self.message == format!("{} cannot be empty", self.field)
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Raw token form values exactly as typed by the user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenDraft {
    pub name: String,
    pub symbol: String,
    pub decimals: String,
    pub amount: String,
    pub description: String,
}

/// A draft that passed validation, with the supply already scaled to base units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidatedToken {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Human readable amount, trimmed.
    pub amount: String,
    /// `amount * 10^decimals`
    pub base_units: u64,
    pub description: String,
}

impl TokenDraft {
    /// Validate every field and collect all failures.
    ///
    /// Required: name, symbol, decimals, amount, description. The amount must be a
    /// positive decimal with at most `decimals` fractional digits.
    pub fn validate(&self) -> Result<ValidatedToken, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        let symbol = self.symbol.trim();
        let description = self.description.trim();
        let amount = self.amount.trim();

        require(name, TokenField::Name, &mut errors);
        require(symbol, TokenField::Symbol, &mut errors);
        require(description, TokenField::Description, &mut errors);
        require(amount, TokenField::Amount, &mut errors);

        if name.len() > MAX_NAME_LENGTH {
            errors.push(FieldError::new(
                TokenField::Name,
                format!("Name must be at most {} bytes", MAX_NAME_LENGTH),
            ));
        }
        if symbol.len() > MAX_SYMBOL_LENGTH {
            errors.push(FieldError::new(
                TokenField::Symbol,
                format!("Symbol must be at most {} bytes", MAX_SYMBOL_LENGTH),
            ));
        }

        let decimals = match parse_decimals(&self.decimals) {
            Ok(decimals) => Some(decimals),
            Err(err) => {
                errors.push(err);
                None
            }
        };

        let base_units = match decimals {
            Some(decimals) if !amount.is_empty() => match scale_amount(amount, decimals) {
                Ok(units) => Some(units),
                Err(err) => {
                    errors.push(FieldError::new(TokenField::Amount, err.to_string()));
                    None
                }
            },
            _ => None,
        };

        match (decimals, base_units) {
            (Some(decimals), Some(base_units)) if errors.is_empty() => Ok(ValidatedToken {
                name: name.to_string(),
                symbol: symbol.to_string(),
                decimals,
                amount: amount.to_string(),
                base_units,
                description: description.to_string(),
            }),
            _ => Err(errors),
        }
    }
}

fn require(value: &str, field: TokenField, errors: &mut Vec<FieldError>) {
    if value.is_empty() {
        errors.push(FieldError::missing(field));
    }
}

fn parse_decimals(raw: &str) -> Result<u8, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::missing(TokenField::Decimals));
    }
    raw.parse::<u8>()
        .ok()
        .filter(|d| *d <= MAX_DECIMALS)
        .ok_or_else(|| {
            FieldError::new(
                TokenField::Decimals,
                format!("Decimals must be a whole number between 0 and {}", MAX_DECIMALS),
            )
        })
}

/// Reasons a human readable amount cannot become base units.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("Amount must be a number")]
    NotANumber,
    #[error("Amount must be greater than 0")]
    NotPositive,
    #[error("Amount has more fractional digits than the token's decimals")]
    TooPrecise,
    #[error("Amount is too large")]
    Overflow,
}

/// Scale a decimal string to integer base units: `"1.5"` with 2 decimals is `150`.
///
/// Exact decimal arithmetic; no floating point is involved.
pub fn scale_amount(amount: &str, decimals: u8) -> Result<u64, AmountError> {
    let amount = amount.trim();
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (amount, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountError::NotANumber);
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotANumber);
    }

    let frac_part = frac_part.trim_end_matches('0');
    if frac_part.len() > decimals as usize {
        return Err(AmountError::TooPrecise);
    }

    let scale = 10u128.pow(decimals as u32);
    let int_value = int_part
        .trim_start_matches('0')
        .chars()
        .try_fold(0u128, |acc, c| {
            acc.checked_mul(10)?.checked_add(c.to_digit(10)? as u128)
        })
        .ok_or(AmountError::Overflow)?;

    let frac_value = if frac_part.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", frac_part, width = decimals as usize);
        padded.parse::<u128>().map_err(|_| AmountError::NotANumber)?
    };

    let total = int_value
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_value))
        .ok_or(AmountError::Overflow)?;

    if total == 0 {
        return Err(AmountError::NotPositive);
    }

    u64::try_from(total).map_err(|_| AmountError::Overflow)
}

/// Off-chain metadata JSON pinned next to the icon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMetadataDocument {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub image: String,
    pub description: String,
}

impl TokenMetadataDocument {
    pub fn new(token: &ValidatedToken, image_url: impl Into<String>) -> Self {
        Self {
            name: token.name.clone(),
            symbol: token.symbol.clone(),
            decimals: token.decimals,
            image: image_url.into(),
            description: token.description.clone(),
        }
    }
}

/// Response of `POST /api/token/prepare`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrepareMintResponse {
    /// Base64 bincode transaction, already signed by the new mint keypair.
    pub transaction: String,
    pub mint_address: String,
    pub associated_token_address: String,
    pub metadata_address: String,
    pub metadata_uri: String,
    pub image_url: String,
}

/// Body of `POST /api/token/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitMintRequest {
    /// Base64 bincode transaction carrying both the mint and wallet signatures.
    pub transaction: String,
    pub mint_address: String,
}

/// Response of `POST /api/token/submit`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitMintResponse {
    pub signature: String,
    pub mint_address: String,
    pub explorer_url: String,
}
