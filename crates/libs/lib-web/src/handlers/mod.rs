//! # HTTP Request Handlers
//!
//! Axum HTTP request handlers organized by feature domain. Handlers extract
//! collaborators from [`crate::AppState`] and delegate to [`crate::services`].
//!
//! ## Handler Modules
//!
//! - **[`token`]**: Token creation endpoints
//!   - `POST /api/token/prepare` - Validate, pin and build the mint transaction
//!   - `POST /api/token/submit` - Submit the wallet-signed transaction
//!
//! ## Error Handling
//!
//! Handlers return `lib_core::Result<Json<T>>`; [`lib_core::AppError`] renders itself as
//! `{"error": "...", "code": "..."}` with the matching status code.
//!
//! ## Request/Response Flow
//!
//! ```text
//! Client Request
//!     ↓
//! CORS Middleware (tower-http)
//!     ↓
//! Request stamping + logging
//!     ↓
//! Handler → TokenService
//!     ↓
//! Response (JSON serialization)
//! ```

pub mod token;
