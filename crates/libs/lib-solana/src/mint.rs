//! # Token Mint Transaction
//!
//! Builds the single transaction that creates a fungible SPL token:
//!
//! 1. system `create_account` for the new mint (rent exempt, owned by the token program)
//! 2. token `initialize_mint` (mint and freeze authority = payer)
//! 3. associated token account for the payer
//! 4. `mint_to` the whole initial supply into that account
//! 5. metadata `CreateMetadataAccountV3` (immutable, no royalties)
//!
//! The fresh mint keypair signs here; the payer's wallet adds the second signature
//! in the browser. [`verify_signed_mint_transaction`] checks the round-tripped result
//! before it is submitted.

use crate::metadata::{
    create_metadata_accounts_v3, find_metadata_address, CreateMetadataAccountArgsV3,
    CreateMetadataAccounts, DataV2,
};
use lib_utils::{b64_decode, b64_encode};
use solana_sdk::{
    hash::Hash,
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::Transaction,
};
use spl_associated_token_account::get_associated_token_address;
use thiserror::Error;

/// Packed length of an SPL token mint account.
pub const MINT_SIZE: usize = 82;

/// Everything needed to build the mint transaction except the keypair and chain state.
#[derive(Debug, Clone)]
pub struct MintRequest {
    /// Wallet paying fees and rent; also mint, freeze and update authority
    pub payer: Pubkey,
    pub decimals: u8,
    /// Initial supply already scaled by `10^decimals`
    pub base_units: u64,
    pub name: String,
    pub symbol: String,
    /// Off-chain metadata JSON location
    pub uri: String,
}

#[derive(Debug, Error)]
pub enum MintError {
    #[error("Invalid metadata: {0}")]
    Metadata(String),

    #[error("Failed to build instruction: {0}")]
    Instruction(String),

    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    #[error("Failed to encode transaction: {0}")]
    Encoding(String),

    #[error("Failed to decode transaction: {0}")]
    Decoding(String),

    #[error("Transaction rejected: {0}")]
    Rejected(String),
}

/// A partially signed mint transaction and the addresses it will create.
#[derive(Debug, Clone)]
pub struct MintTransaction {
    pub transaction: Transaction,
    pub mint: Pubkey,
    pub associated_token_account: Pubkey,
    pub metadata: Pubkey,
}

impl MintTransaction {
    /// Base64 of the bincode wire format, as wallets expect it.
    pub fn encode_base64(&self) -> Result<String, MintError> {
        encode_transaction(&self.transaction)
    }
}

/// The five instructions, in execution order.
pub fn create_token_instructions(
    request: &MintRequest,
    mint: &Pubkey,
    rent_lamports: u64,
) -> Result<Vec<Instruction>, MintError> {
    let payer = &request.payer;
    let token_program = spl_token::id();

    let create_mint_account = solana_system_interface::instruction::create_account(
        payer,
        mint,
        rent_lamports,
        MINT_SIZE as u64,
        &token_program,
    );

    let initialize_mint = spl_token::instruction::initialize_mint(
        &token_program,
        mint,
        payer,
        Some(payer),
        request.decimals,
    )
    .map_err(|e| MintError::Instruction(format!("initialize_mint: {}", e)))?;

    let associated_token_account = get_associated_token_address(payer, mint);
    let create_ata = spl_associated_token_account::instruction::create_associated_token_account(
        payer,
        payer,
        mint,
        &token_program,
    );

    let mint_to = spl_token::instruction::mint_to(
        &token_program,
        mint,
        &associated_token_account,
        payer,
        &[],
        request.base_units,
    )
    .map_err(|e| MintError::Instruction(format!("mint_to: {}", e)))?;

    let data = DataV2::fungible(&request.name, &request.symbol, &request.uri);
    data.check_lengths().map_err(MintError::Metadata)?;

    let create_metadata = create_metadata_accounts_v3(
        &CreateMetadataAccounts {
            metadata: find_metadata_address(mint),
            mint: *mint,
            mint_authority: *payer,
            payer: *payer,
            update_authority: *payer,
        },
        &CreateMetadataAccountArgsV3 {
            data,
            is_mutable: false,
            collection_details: None,
        },
    )
    .map_err(|e| MintError::Instruction(format!("create_metadata_accounts_v3: {}", e)))?;

    Ok(vec![create_mint_account, initialize_mint, create_ata, mint_to, create_metadata])
}

/// Build the mint transaction and sign it with the mint keypair only.
pub fn build_create_token_transaction(
    request: &MintRequest,
    mint_keypair: &Keypair,
    rent_lamports: u64,
    recent_blockhash: Hash,
) -> Result<MintTransaction, MintError> {
    let mint = mint_keypair.pubkey();
    let instructions = create_token_instructions(request, &mint, rent_lamports)?;

    let mut transaction = Transaction::new_with_payer(&instructions, Some(&request.payer));
    transaction
        .try_partial_sign(&[mint_keypair], recent_blockhash)
        .map_err(|e| MintError::Signing(e.to_string()))?;

    Ok(MintTransaction {
        transaction,
        mint,
        associated_token_account: get_associated_token_address(&request.payer, &mint),
        metadata: find_metadata_address(&mint),
    })
}

pub fn encode_transaction(transaction: &Transaction) -> Result<String, MintError> {
    let bytes = bincode::serialize(transaction).map_err(|e| MintError::Encoding(e.to_string()))?;
    Ok(b64_encode(bytes))
}

pub fn decode_transaction(encoded: &str) -> Result<Transaction, MintError> {
    let bytes = b64_decode(encoded.trim()).map_err(|e| MintError::Decoding(e.to_string()))?;
    bincode::deserialize(&bytes).map_err(|e| MintError::Decoding(e.to_string()))
}

/// Check a wallet-signed transaction before submission.
///
/// The expected mint must be a required signer, every required signature must be
/// present and valid, and only the programs used by the mint flow may be invoked.
pub fn verify_signed_mint_transaction(transaction: &Transaction, expected_mint: &Pubkey) -> Result<(), MintError> {
    let message = &transaction.message;
    let signer_count = message.header.num_required_signatures as usize;

    let is_signer = message
        .account_keys
        .iter()
        .take(signer_count)
        .any(|key| key == expected_mint);
    if !is_signer {
        return Err(MintError::Rejected("mint is not a signer of this transaction".to_string()));
    }

    if transaction.signatures.len() != signer_count
        || transaction.signatures.iter().any(|s| *s == Signature::default())
    {
        return Err(MintError::Rejected("transaction is missing signatures".to_string()));
    }

    let allowed = [
        solana_system_interface::program::ID,
        spl_token::id(),
        spl_associated_token_account::id(),
        crate::metadata::METADATA_PROGRAM_ID,
    ];
    for ix in &message.instructions {
        let program = message
            .account_keys
            .get(ix.program_id_index as usize)
            .ok_or_else(|| MintError::Rejected("instruction program index out of range".to_string()))?;
        if !allowed.contains(program) {
            return Err(MintError::Rejected(format!("unexpected program {}", program)));
        }
    }

    transaction
        .verify()
        .map_err(|e| MintError::Rejected(format!("signature verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::METADATA_PROGRAM_ID;

    fn request(payer: Pubkey) -> MintRequest {
        MintRequest {
            payer,
            decimals: 6,
            base_units: 1_000_000_000,
            name: "Gold".to_string(),
            symbol: "GLD".to_string(),
            uri: "https://gateway.example/ipfs/QmMeta".to_string(),
        }
    }

    #[test]
    fn test_instruction_order() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ixs = create_token_instructions(&request(payer), &mint, 1_461_600).unwrap();

        assert_eq!(ixs.len(), 5);
        assert_eq!(ixs[0].program_id, solana_system_interface::program::ID);
        assert_eq!(ixs[1].program_id, spl_token::id());
        assert_eq!(ixs[2].program_id, spl_associated_token_account::id());
        assert_eq!(ixs[3].program_id, spl_token::id());
        assert_eq!(ixs[4].program_id, METADATA_PROGRAM_ID);
    }

    #[test]
    fn test_metadata_too_long_rejected() {
        let payer = Pubkey::new_unique();
        let mut req = request(payer);
        req.symbol = "WAYTOOLONGSYMBOL".to_string();
        let err = create_token_instructions(&req, &Pubkey::new_unique(), 1).unwrap_err();
        assert!(matches!(err, MintError::Metadata(_)));
    }

    #[test]
    fn test_build_signs_with_mint_only() {
        let payer = Keypair::new();
        let mint = Keypair::new();
        let built = build_create_token_transaction(&request(payer.pubkey()), &mint, 1, Hash::new_unique()).unwrap();

        let tx = &built.transaction;
        assert_eq!(built.mint, mint.pubkey());
        assert_eq!(tx.message.account_keys[0], payer.pubkey());
        assert_eq!(tx.message.header.num_required_signatures, 2);
        // payer slot still empty
        assert_eq!(tx.signatures[0], Signature::default());
        assert_ne!(tx.signatures[1], Signature::default());
        assert_eq!(built.associated_token_account, get_associated_token_address(&payer.pubkey(), &mint.pubkey()));
    }

    #[test]
    fn test_verify_rejects_partially_signed() {
        let payer = Keypair::new();
        let mint = Keypair::new();
        let built = build_create_token_transaction(&request(payer.pubkey()), &mint, 1, Hash::new_unique()).unwrap();

        let decoded = decode_transaction(&built.encode_base64().unwrap()).unwrap();
        let err = verify_signed_mint_transaction(&decoded, &mint.pubkey()).unwrap_err();
        assert!(err.to_string().contains("missing signatures"));
    }

    #[test]
    fn test_verify_accepts_wallet_signed() {
        let payer = Keypair::new();
        let mint = Keypair::new();
        let blockhash = Hash::new_unique();
        let built = build_create_token_transaction(&request(payer.pubkey()), &mint, 1, blockhash).unwrap();

        let mut tx = decode_transaction(&built.encode_base64().unwrap()).unwrap();
        tx.try_partial_sign(&[&payer], blockhash).unwrap();

        assert!(verify_signed_mint_transaction(&tx, &mint.pubkey()).is_ok());
        assert!(verify_signed_mint_transaction(&tx, &Pubkey::new_unique()).is_err());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(decode_transaction("not base64!"), Err(MintError::Decoding(_))));
        assert!(matches!(decode_transaction("AAAA"), Err(MintError::Decoding(_))));
    }
}
