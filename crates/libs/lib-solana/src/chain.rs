//! Chain access used by the mint flow.
//!
//! The web tier only needs rent, a blockhash and transaction submission, so it
//! talks to this trait instead of [`SolanaClient`] directly and tests swap in a fake.

use crate::client::{Network, SolanaClient};
use async_trait::async_trait;
use solana_sdk::{hash::Hash, signature::Signature, transaction::Transaction};

#[async_trait]
pub trait TokenChain: Send + Sync {
    /// Cluster the transactions land on.
    fn network(&self) -> Network;

    /// Lamports for a rent-exempt mint account.
    async fn mint_rent_exemption(&self) -> anyhow::Result<u64>;

    async fn latest_blockhash(&self) -> anyhow::Result<Hash>;

    /// Submit a fully signed transaction and wait for `confirmed`.
    async fn send_and_confirm(&self, transaction: &Transaction) -> anyhow::Result<Signature>;
}

#[async_trait]
impl TokenChain for SolanaClient {
    fn network(&self) -> Network {
        SolanaClient::network(self)
    }

    async fn mint_rent_exemption(&self) -> anyhow::Result<u64> {
        SolanaClient::mint_rent_exemption(self).await
    }

    async fn latest_blockhash(&self) -> anyhow::Result<Hash> {
        self.get_latest_blockhash().await
    }

    async fn send_and_confirm(&self, transaction: &Transaction) -> anyhow::Result<Signature> {
        self.send_transaction(transaction).await
    }
}
