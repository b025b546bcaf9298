//! # Utilities Library
//!
//! Shared utility functions for base64 encoding and environment variables.

pub mod b64;
pub mod envs;

// Re-export commonly used functions
pub use b64::{b64_decode, b64_encode};
pub use envs::{get_env, get_env_or, get_env_parse_or};
