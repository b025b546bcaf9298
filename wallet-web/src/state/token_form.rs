//! Token creation form state
//!
//! Plain Rust, no signals: the page keeps one `RwSignal<TokenFormState>` and
//! drives it through these methods, so the gating rules are unit-testable
//! without a browser.

use shared::dto::token::{FieldError, TokenDraft, TokenField, ValidatedToken};

/// A token that made it on chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MintedToken {
    pub mint_address: String,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub explorer_url: String,
}

/// What pressing the main button should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitGate {
    /// Start the prepare → sign → submit chain with this token
    Ready(ValidatedToken),
    /// A previous mint finished; the form was cleared instead
    Reset,
    /// A request is already in flight
    Busy,
    /// No wallet to pay for and sign the transaction
    Disconnected,
    /// Missing or malformed fields, also stored in `errors`
    Invalid(Vec<FieldError>),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenFormState {
    pub draft: TokenDraft,
    /// File name of the selected icon; the `File` itself lives in a local signal
    pub image_name: Option<String>,
    pub loading: bool,
    pub minted: Option<MintedToken>,
    pub errors: Vec<FieldError>,
}

impl TokenFormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the button is clickable.
    pub fn can_submit(&self, connected: bool) -> bool {
        connected && !self.loading
    }

    pub fn set_field(&mut self, field: TokenField, value: String) {
        match field {
            TokenField::Name => self.draft.name = value,
            TokenField::Symbol => self.draft.symbol = value,
            TokenField::Decimals => self.draft.decimals = value,
            TokenField::Amount => self.draft.amount = value,
            TokenField::Description => self.draft.description = value,
            TokenField::Image => {}
        }
        self.errors.retain(|e| e.field != field);
    }

    pub fn field(&self, field: TokenField) -> &str {
        match field {
            TokenField::Name => &self.draft.name,
            TokenField::Symbol => &self.draft.symbol,
            TokenField::Decimals => &self.draft.decimals,
            TokenField::Amount => &self.draft.amount,
            TokenField::Description => &self.draft.description,
            TokenField::Image => self.image_name.as_deref().unwrap_or_default(),
        }
    }

    pub fn set_image(&mut self, name: String) {
        self.image_name = Some(name);
        self.errors.retain(|e| e.field != TokenField::Image);
    }

    pub fn clear_image(&mut self) {
        self.image_name = None;
    }

    /// Decide what a button press does and flip `loading` when a request starts.
    pub fn begin_submit(&mut self, connected: bool) -> SubmitGate {
        if self.minted.is_some() {
            self.reset();
            return SubmitGate::Reset;
        }
        if self.loading {
            return SubmitGate::Busy;
        }
        if !connected {
            return SubmitGate::Disconnected;
        }

        let mut errors = Vec::new();
        if self.image_name.is_none() {
            errors.push(FieldError::missing(TokenField::Image));
        }
        let token = match self.draft.validate() {
            Ok(token) => Some(token),
            Err(field_errors) => {
                errors.extend(field_errors);
                None
            }
        };

        match token {
            Some(token) if errors.is_empty() => {
                self.errors.clear();
                self.loading = true;
                SubmitGate::Ready(token)
            }
            _ => {
                self.errors = errors.clone();
                SubmitGate::Invalid(errors)
            }
        }
    }

    /// Record the outcome of the chain started by [`Self::begin_submit`].
    pub fn finish_submit(&mut self, outcome: Result<MintedToken, Vec<FieldError>>) {
        self.loading = false;
        match outcome {
            Ok(minted) => self.minted = Some(minted),
            Err(errors) => self.errors = errors,
        }
    }

    /// Clear everything, including the minted token.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn error_for(&self, field: TokenField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
