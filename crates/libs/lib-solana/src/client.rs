//! # Solana RPC Client
//!
//! Provides a high-level wrapper around the nonblocking Solana RPC client with
//! network management.
//!
//! ## Features
//!
//! - **Network Selection**: Easy switching between Mainnet and Devnet
//! - **Helius Integration**: Support for premium RPC endpoints with API keys
//! - **Rent Queries**: Minimum balance for a rent-exempt mint account
//! - **Transaction Submission**: Send and confirm transactions on-chain
//! - **Health Checks**: Verify RPC endpoint connectivity
//!
//! ## RPC Endpoints
//!
//! | Network | URL |
//! |---|---|
//! | Mainnet + Helius key | `https://mainnet.helius-rpc.com/?api-key={key}` |
//! | Mainnet | `https://api.mainnet-beta.solana.com` |
//! | Devnet | `https://api.devnet.solana.com` |
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_solana::client::{SolanaClient, Network};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = SolanaClient::builder()
//!     .network(Network::Devnet)
//!     .build();
//!
//! client.health_check().await?;
//! let lamports = client.mint_rent_exemption().await?;
//! println!("A mint account needs {} lamports", lamports);
//! # Ok(())
//! # }
//! ```

use crate::mint::MINT_SIZE;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{hash::Hash, signature::Signature, transaction::Transaction};
use std::sync::Arc;
use tracing::{debug, info};

/// Solana network selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Solana mainnet-beta (production network)
    Mainnet,
    /// Solana devnet (test network)
    Devnet,
}

impl Network {
    /// Parse a configured network name (`devnet`, `mainnet`, `mainnet-beta`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "devnet" => Some(Network::Devnet),
            "mainnet" | "mainnet-beta" => Some(Network::Mainnet),
            _ => None,
        }
    }

    /// Cluster name used by Solana Explorer links.
    pub fn explorer_cluster(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet-beta",
            Network::Devnet => "devnet",
        }
    }

    /// Public RPC URL, or the Helius endpoint on mainnet when a key is given.
    pub fn default_rpc_url(&self, helius_api_key: Option<&str>) -> String {
        match (self, helius_api_key) {
            (Network::Mainnet, Some(key)) => format!("https://mainnet.helius-rpc.com/?api-key={}", key),
            (Network::Mainnet, None) => "https://api.mainnet-beta.solana.com".to_string(),
            (Network::Devnet, _) => "https://api.devnet.solana.com".to_string(),
        }
    }
}

/// High-level Solana RPC client wrapper.
///
/// All requests use `confirmed` commitment, which is what the wallet flow waits for.
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
    network: Network,
}

/// Builder for configuring SolanaClient.
#[derive(Debug, Clone)]
pub struct SolanaClientBuilder {
    network: Option<Network>,
    helius_api_key: Option<String>,
    custom_rpc_url: Option<String>,
}

impl Default for SolanaClientBuilder {
    fn default() -> Self {
        Self {
            network: Some(Network::Devnet),
            helius_api_key: None,
            custom_rpc_url: None,
        }
    }
}

impl SolanaClientBuilder {
    /// Set the Solana network.
    pub fn network(mut self, network: Network) -> Self {
        self.network = Some(network);
        self
    }

    /// Set the Helius API key for premium RPC access.
    pub fn helius_api_key(mut self, key: Option<String>) -> Self {
        self.helius_api_key = key;
        self
    }

    /// Set a custom RPC URL (overrides network-based URL).
    pub fn custom_rpc_url(mut self, url: Option<String>) -> Self {
        self.custom_rpc_url = url;
        self
    }

    /// Resolve the RPC URL the client will use.
    pub fn rpc_url(&self) -> String {
        let network = self.network.unwrap_or(Network::Devnet);
        self.custom_rpc_url
            .clone()
            .unwrap_or_else(|| network.default_rpc_url(self.helius_api_key.as_deref()))
    }

    /// Build the SolanaClient with configured settings.
    pub fn build(self) -> SolanaClient {
        let network = self.network.unwrap_or(Network::Devnet);
        let rpc_url = self.rpc_url();

        info!("🔗 Connecting to Solana RPC ({:?})", network);
        debug!("RPC URL: {}", rpc_url);

        let rpc = Arc::new(RpcClient::new_with_commitment(rpc_url, CommitmentConfig::confirmed()));
        SolanaClient { rpc, network }
    }
}

impl SolanaClient {
    /// Create a new Solana RPC client using a builder for configuration.
    pub fn builder() -> SolanaClientBuilder {
        SolanaClientBuilder::default()
    }

    /// Lamports needed to keep a mint account rent exempt.
    pub async fn mint_rent_exemption(&self) -> anyhow::Result<u64> {
        self.rpc
            .get_minimum_balance_for_rent_exemption(MINT_SIZE)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get rent exemption: {}", e))
    }

    /// Get the latest blockhash from the blockchain.
    ///
    /// Blockhashes expire after ~60 seconds, so they should be fetched close to when
    /// the transaction will be signed.
    pub async fn get_latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.rpc.get_latest_blockhash().await
            .map_err(|e| anyhow::anyhow!("Failed to get latest blockhash: {}", e))
    }

    /// Send a fully signed transaction and wait for confirmation.
    ///
    /// # Error Conditions
    ///
    /// - Transaction simulation fails (invalid instructions)
    /// - Insufficient balance for fees and rent
    /// - Invalid signatures
    /// - Blockhash expired (transaction too old)
    pub async fn send_transaction(&self, transaction: &Transaction) -> anyhow::Result<Signature> {
        self.rpc
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send transaction: {}", e))
    }

    /// Check if the RPC endpoint is healthy and responsive.
    pub async fn health_check(&self) -> anyhow::Result<()> {
        let _ = self.rpc.get_version().await
            .map_err(|e| anyhow::anyhow!("Health check failed: {}", e))?;
        Ok(())
    }

    /// Get the network this client is connected to.
    pub fn network(&self) -> Network {
        self.network
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_name() {
        assert_eq!(Network::from_name("devnet"), Some(Network::Devnet));
        assert_eq!(Network::from_name(" Mainnet "), Some(Network::Mainnet));
        assert_eq!(Network::from_name("mainnet-beta"), Some(Network::Mainnet));
        assert_eq!(Network::from_name("testnet"), None);
    }

    #[test]
    fn test_explorer_cluster() {
        assert_eq!(Network::Devnet.explorer_cluster(), "devnet");
        assert_eq!(Network::Mainnet.explorer_cluster(), "mainnet-beta");
    }

    #[test]
    fn test_builder_rpc_url() {
        let builder = SolanaClient::builder();
        assert_eq!(builder.rpc_url(), "https://api.devnet.solana.com");

        let builder = SolanaClient::builder()
            .network(Network::Mainnet)
            .helius_api_key(Some("abc".to_string()));
        assert_eq!(builder.rpc_url(), "https://mainnet.helius-rpc.com/?api-key=abc");

        let builder = SolanaClient::builder()
            .network(Network::Mainnet)
            .custom_rpc_url(Some("http://localhost:8899".to_string()));
        assert_eq!(builder.rpc_url(), "http://localhost:8899");
    }

    #[test]
    fn test_helius_key_ignored_on_devnet() {
        assert_eq!(Network::Devnet.default_rpc_url(Some("abc")), "https://api.devnet.solana.com");
    }
}
