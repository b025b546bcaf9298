//! Multi-Wallet Integration via wasm-bindgen
//!
//! JavaScript interop for the injected Solana wallet providers (Phantom, Solflare,
//! Backpack). The wallet only ever connects and signs; the backend builds and
//! broadcasts the transaction.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};

/// Supported wallet provider types
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletProvider {
    Phantom,
    Solflare,
    Backpack,
}

impl WalletProvider {
    pub const ALL: [WalletProvider; 3] = [
        WalletProvider::Phantom,
        WalletProvider::Solflare,
        WalletProvider::Backpack,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WalletProvider::Phantom => "Phantom",
            WalletProvider::Solflare => "Solflare",
            WalletProvider::Backpack => "Backpack",
        }
    }

    /// Identifier understood by the JS helpers below
    pub fn id(&self) -> &'static str {
        match self {
            WalletProvider::Phantom => "phantom",
            WalletProvider::Solflare => "solflare",
            WalletProvider::Backpack => "backpack",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.id() == id)
    }
}

// ============================================================================
// WALLET DETECTION, CONNECTION AND SIGNING (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function detectWallets() {
    const wallets = [];

    if (window.solana && window.solana.isPhantom) {
        wallets.push({ name: 'Phantom', provider: 'phantom', installed: true });
    }

    if (window.solflare && typeof window.solflare.connect === 'function') {
        wallets.push({ name: 'Solflare', provider: 'solflare', installed: true });
    } else if (window.solana && window.solana.isSolflare === true) {
        wallets.push({ name: 'Solflare', provider: 'solflare', installed: true });
    }

    if (window.backpack || (window.solana && window.solana.isBackpack)) {
        wallets.push({ name: 'Backpack', provider: 'backpack', installed: true });
    }

    return wallets;
}

export function getWalletAdapter(provider) {
    switch(provider) {
        case 'phantom':
            return window.solana && window.solana.isPhantom ? window.solana : null;
        case 'solflare':
            if (window.solflare) {
                return window.solflare;
            }
            return window.solana && window.solana.isSolflare === true ? window.solana : null;
        case 'backpack':
            if (window.backpack) {
                return window.backpack;
            }
            return window.solana && window.solana.isBackpack ? window.solana : null;
        default:
            return null;
    }
}

export async function connectWallet(provider) {
    const adapter = getWalletAdapter(provider);
    if (!adapter) {
        throw new Error(provider + ' wallet not found');
    }

    try {
        const response = await adapter.connect();
        // Solflare resolves to a boolean and exposes the key on the adapter
        const publicKey = (response && response.publicKey) || adapter.publicKey;
        if (!publicKey) {
            throw new Error('Connected but could not retrieve public key');
        }
        return { publicKey: publicKey.toString(), provider: provider };
    } catch (error) {
        const errorMsg = error instanceof Error ? error.message : String(error);
        throw new Error('Failed to connect to ' + provider + ': ' + errorMsg);
    }
}

export async function disconnectWallet(provider) {
    const adapter = getWalletAdapter(provider);
    if (adapter && typeof adapter.disconnect === 'function') {
        await adapter.disconnect();
    }
}

export async function signTransactionWithProvider(provider, base64Tx) {
    try {
        const adapter = getWalletAdapter(provider);
        if (!adapter) {
            throw new Error('Wallet adapter not found');
        }
        if (typeof window.solanaWeb3 === 'undefined') {
            throw new Error('Solana Web3.js not loaded');
        }
        if (!adapter.signTransaction) {
            throw new Error('Wallet does not support transaction signing');
        }

        const txBuffer = Uint8Array.from(atob(base64Tx), c => c.charCodeAt(0));
        const tx = window.solanaWeb3.Transaction.from(txBuffer);

        // The mint keypair already signed; the wallet adds the fee payer signature
        const signedTx = await adapter.signTransaction(tx);
        const serialized = signedTx.serialize();
        let binary = '';
        for (let i = 0; i < serialized.length; i++) {
            binary += String.fromCharCode(serialized[i]);
        }
        return btoa(binary);
    } catch (error) {
        const errorMsg = error instanceof Error ? error.message : String(error);
        throw new Error(errorMsg);
    }
}
")]
extern "C" {
    /// Detect all installed wallets
    pub fn detectWallets() -> JsValue;

    /// Connect to a specific wallet provider
    #[wasm_bindgen(catch)]
    pub async fn connectWallet(provider: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    pub async fn disconnectWallet(provider: &str) -> Result<JsValue, JsValue>;

    /// Sign a base64 transaction with a wallet provider (returns the signed transaction as base64)
    #[wasm_bindgen(catch)]
    pub async fn signTransactionWithProvider(provider: &str, base64_tx: &str) -> Result<JsValue, JsValue>;
}

// ============================================================================
// WALLET SERVICE
// ============================================================================

/// Wallet connection state with provider information
#[derive(Clone, Debug, PartialEq)]
pub enum WalletState {
    Disconnected,
    Connecting,
    Connected { address: String, provider: WalletProvider },
    Error(String),
}

impl WalletState {
    pub fn is_connected(&self) -> bool {
        matches!(self, WalletState::Connected { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            WalletState::Connected { address, .. } => Some(address),
            _ => None,
        }
    }

    pub fn provider(&self) -> Option<WalletProvider> {
        match self {
            WalletState::Connected { provider, .. } => Some(provider.clone()),
            _ => None,
        }
    }
}

/// Detected wallet information
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectedWallet {
    pub name: String,
    pub provider: String,
    pub installed: bool,
}

/// Get list of installed wallets
pub fn get_available_wallets() -> Vec<WalletProvider> {
    let wallets: Vec<DetectedWallet> = serde_wasm_bindgen::from_value(detectWallets())
        .unwrap_or_default();
    wallets
        .iter()
        .filter(|w| w.installed)
        .filter_map(|w| WalletProvider::from_id(&w.provider))
        .collect()
}

fn js_error_message(e: JsValue, fallback: &str) -> String {
    if let Some(err_str) = e.as_string() {
        return err_str;
    }
    js_sys::Reflect::get(&e, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{}: {:?}", fallback, e))
}

/// Connect to a wallet provider
pub async fn connect_wallet_provider(provider: &WalletProvider) -> Result<(String, WalletProvider), String> {
    let result = connectWallet(provider.id())
        .await
        .map_err(|e| js_error_message(e, "Connection error"))?;

    let pk_val = js_sys::Reflect::get(&result, &JsValue::from_str("publicKey"))
        .map_err(|_| "Failed to get publicKey from result".to_string())?;
    let address = pk_val
        .as_string()
        .ok_or_else(|| "PublicKey is not a string".to_string())?;

    Ok((address, provider.clone()))
}

pub async fn disconnect_wallet_provider(provider: &WalletProvider) -> Result<(), String> {
    disconnectWallet(provider.id())
        .await
        .map(|_| ())
        .map_err(|e| js_error_message(e, "Disconnect error"))
}

/// Have the wallet add its signature to a prepared base64 transaction
pub async fn sign_transaction(provider: &WalletProvider, base64_tx: &str) -> Result<String, String> {
    let signed = signTransactionWithProvider(provider.id(), base64_tx)
        .await
        .map_err(|e| js_error_message(e, "Sign error"))?;
    signed
        .as_string()
        .ok_or_else(|| "Failed to get signed transaction: invalid response type".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_ids_round_trip() {
        for provider in WalletProvider::ALL {
            assert_eq!(WalletProvider::from_id(provider.id()), Some(provider.clone()));
        }
        assert_eq!(WalletProvider::from_id("sollet"), None);
    }

    #[test]
    fn test_wallet_state_accessors() {
        let state = WalletState::Connected {
            address: "Abc".to_string(),
            provider: WalletProvider::Phantom,
        };
        assert!(state.is_connected());
        assert_eq!(state.address(), Some("Abc"));
        assert_eq!(state.provider(), Some(WalletProvider::Phantom));

        assert!(!WalletState::Connecting.is_connected());
        assert_eq!(WalletState::Error("x".to_string()).address(), None);
    }
}
