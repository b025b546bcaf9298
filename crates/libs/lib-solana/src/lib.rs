//! # Solana Library
//!
//! Solana integration for token creation: RPC client, the mint transaction builder
//! and the metadata program instruction.

pub mod chain;
pub mod client;
pub mod metadata;
pub mod mint;

pub use chain::TokenChain;
pub use client::{Network, SolanaClient};
pub use mint::{
    build_create_token_transaction, decode_transaction, verify_signed_mint_transaction,
    MintError, MintRequest, MintTransaction,
};
