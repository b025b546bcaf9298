//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the browser app (`wallet-web`) and the
//! backend API. All DTOs use JSON serialization via `serde` for API communication.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::token`]**: Token form, validation rules, and mint request/response DTOs
//!   - **[`dto::common`]**: Error envelope shared by every endpoint
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::explorer_address_url`]**: Build Solana Explorer links
//!
//! ## Wire Format
//!
//! - Field names use **snake_case** in both Rust and JSON
//! - Optional fields are omitted from JSON when `None`
//! - Enums serialize to lowercase strings
//!
//! ## Usage in Backend
//!
//! ```rust,no_run
//! use shared::dto::token::TokenDraft;
//!
//! let draft = TokenDraft {
//!     name: "Gold".to_string(),
//!     symbol: "GLD".to_string(),
//!     decimals: "6".to_string(),
//!     amount: "1000".to_string(),
//!     description: "Shiny".to_string(),
//! };
//! let token = draft.validate().expect("valid draft");
//! assert_eq!(token.base_units, 1_000_000_000);
//! ```
//!
//! The browser runs the same [`dto::token::TokenDraft::validate`] before it uploads
//! anything, so both tiers reject a form for identical reasons.

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
