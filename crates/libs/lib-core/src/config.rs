//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! ```rust,no_run
//! use lib_core::config::Config;
//!
//! dotenvy::dotenv().ok();
//! let config = Config::from_env().expect("config");
//! config.validate().expect("valid config");
//! println!("Pinning through {}", config.pinata_api_url);
//! ```

use lib_utils::envs::{get_env, get_env_or, get_env_parse_or};

/// Default pinning API base URL.
pub const DEFAULT_PINATA_API_URL: &str = "https://api.pinata.cloud";
/// Default gateway prefix prepended to returned content hashes.
pub const DEFAULT_PINATA_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs/";
/// Default upload cap for token icons (5 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
/// Default server bind address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct Config {
    /// Bearer token for the pinning API
    ///
    /// Never sent to the browser.
    pub pinata_jwt: String,

    /// Pinning API base URL (`PINATA_API_URL`)
    pub pinata_api_url: String,

    /// Gateway prefix; the public URL of a pinned object is this plus its CID
    pub pinata_gateway_url: String,

    /// `devnet` or `mainnet`
    pub solana_network: String,

    /// Explicit RPC endpoint, overrides the network default
    pub solana_rpc_url: Option<String>,

    /// Helius API key for premium mainnet RPC access
    pub helius_api_key: Option<String>,

    /// Largest accepted token icon, in bytes
    pub max_image_bytes: usize,

    /// Address the HTTP server binds to
    pub bind_address: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let pinata_jwt = get_env("PINATA_JWT")
            .map_err(|_| "PINATA_JWT must be set in environment")?;

        let pinata_api_url = get_env_or("PINATA_API_URL", DEFAULT_PINATA_API_URL);
        let pinata_gateway_url = get_env_or("PINATA_GATEWAY_URL", DEFAULT_PINATA_GATEWAY_URL);

        let solana_network = get_env_or("SOLANA_NETWORK", "devnet").trim().to_lowercase();
        let solana_rpc_url = get_env("SOLANA_RPC_URL").ok().filter(|s| !s.trim().is_empty());
        let helius_api_key = get_env("HELIUS_API_KEY").ok().filter(|s| !s.trim().is_empty());

        let max_image_bytes = get_env_parse_or("MAX_IMAGE_BYTES", DEFAULT_MAX_IMAGE_BYTES)
            .map_err(|e| format!("MAX_IMAGE_BYTES must be a valid number: {}", e))?;

        let bind_address = get_env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS);

        Ok(Self {
            pinata_jwt,
            pinata_api_url,
            pinata_gateway_url,
            solana_network,
            solana_rpc_url,
            helius_api_key,
            max_image_bytes,
            bind_address,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.pinata_jwt.trim().is_empty() {
            return Err("PINATA_JWT cannot be empty".to_string());
        }

        if !self.pinata_gateway_url.ends_with('/') {
            return Err("PINATA_GATEWAY_URL must end with '/'".to_string());
        }

        if !matches!(self.solana_network.as_str(), "devnet" | "mainnet") {
            return Err(format!(
                "SOLANA_NETWORK must be 'devnet' or 'mainnet', got '{}'",
                self.solana_network
            ));
        }

        if self.max_image_bytes == 0 {
            return Err("MAX_IMAGE_BYTES must be greater than 0".to_string());
        }

        Ok(())
    }
}
