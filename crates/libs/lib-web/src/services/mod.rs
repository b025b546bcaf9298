//! # Services Layer
//!
//! Business logic that orchestrates the chain and pinning collaborators on behalf
//! of the HTTP handlers:
//!
//! ```text
//! Handlers (HTTP) → Services (Business Logic) → Solana RPC / Pinning API
//! ```
//!
//! - [`token`] - Token creation (prepare and submit)
//!
//! All services return `Result<T, AppError>`; lower-level errors are converted to
//! the matching `AppError` variant at this layer.

pub mod token;

pub use token::{TokenService, TokenUpload};
