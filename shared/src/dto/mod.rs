//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures used for communication between
//! the browser app and the backend via the REST API.
//!
//! ## Module Organization
//!
//! - [`token`] - Token form, field validation, amount scaling, mint DTOs
//! - [`common`] - Error envelope
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/token/submit
//! Content-Type: application/json
//!
//! {
//!   "transaction": "AgAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA...",
//!   "mint_address": "5h3Zr1ty8tE1kKpX9dWZ1m1kWmVvYk3oKz1o7vqJ3k8Q"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "signature": "4hXTCkRzt9WyecNzV1XPgCDfGAZzQKNxLXgynz5QDuWW...",
//!   "mint_address": "5h3Zr1ty8tE1kKpX9dWZ1m1kWmVvYk3oKz1o7vqJ3k8Q",
//!   "explorer_url": "https://explorer.solana.com/address/5h3Z...?cluster=devnet"
//! }
//! ```

pub mod common;
pub mod token;

pub use common::*;
pub use token::*;
