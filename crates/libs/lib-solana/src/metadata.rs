//! # Token Metadata Instruction
//!
//! Builds the metadata program's `CreateMetadataAccountV3` instruction.
//!
//! Only this one instruction is needed to attach a display name, symbol and off-chain
//! URI to a freshly created mint, so the argument types below mirror the program's
//! published borsh layout for it and nothing else.
//!
//! ```rust
//! use lib_solana::metadata::{find_metadata_address, METADATA_PROGRAM_ID};
//! use solana_sdk::pubkey::Pubkey;
//!
//! let mint = Pubkey::new_unique();
//! let metadata = find_metadata_address(&mint);
//! assert_ne!(metadata, mint);
//! assert_ne!(metadata, METADATA_PROGRAM_ID);
//! ```

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

/// Metaplex token metadata program.
pub const METADATA_PROGRAM_ID: Pubkey =
    Pubkey::from_str_const("metaqbxxUerdq28cj1RbAWkYQm3ybzjb6a8bt518x1s");

/// PDA seed prefix used by the metadata program.
pub const METADATA_SEED: &[u8] = b"metadata";

/// Instruction discriminant of `CreateMetadataAccountV3`.
pub const CREATE_METADATA_ACCOUNT_V3: u8 = 33;

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_URI_LENGTH: usize = 200;

/// Derive the metadata account address for a mint.
pub fn find_metadata_address(mint: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[METADATA_SEED, METADATA_PROGRAM_ID.as_ref(), mint.as_ref()],
        &METADATA_PROGRAM_ID,
    )
    .0
}

// region: --- Borsh layout

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Creator {
    pub address: [u8; 32],
    pub verified: bool,
    pub share: u8,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    pub verified: bool,
    pub key: [u8; 32],
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UseMethod {
    Burn,
    Multiple,
    Single,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Uses {
    pub use_method: UseMethod,
    pub remaining: u64,
    pub total: u64,
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum CollectionDetails {
    V1 { size: u64 },
}

/// On-chain metadata body.
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct DataV2 {
    pub name: String,
    pub symbol: String,
    pub uri: String,
    pub seller_fee_basis_points: u16,
    pub creators: Option<Vec<Creator>>,
    pub collection: Option<Collection>,
    pub uses: Option<Uses>,
}

impl DataV2 {
    /// Fungible token metadata: no royalties, creators, collection or uses.
    pub fn fungible(name: impl Into<String>, symbol: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            uri: uri.into(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        }
    }

    /// Check the program's length limits before paying for a doomed transaction.
    pub fn check_lengths(&self) -> Result<(), String> {
        if self.name.len() > MAX_NAME_LENGTH {
            return Err(format!("name exceeds {} bytes", MAX_NAME_LENGTH));
        }
        if self.symbol.len() > MAX_SYMBOL_LENGTH {
            return Err(format!("symbol exceeds {} bytes", MAX_SYMBOL_LENGTH));
        }
        if self.uri.len() > MAX_URI_LENGTH {
            return Err(format!("uri exceeds {} bytes", MAX_URI_LENGTH));
        }
        Ok(())
    }
}

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateMetadataAccountArgsV3 {
    pub data: DataV2,
    pub is_mutable: bool,
    pub collection_details: Option<CollectionDetails>,
}

// endregion: --- Borsh layout

/// Accounts of `CreateMetadataAccountV3`, in program order.
#[derive(Clone, Debug)]
pub struct CreateMetadataAccounts {
    pub metadata: Pubkey,
    pub mint: Pubkey,
    pub mint_authority: Pubkey,
    pub payer: Pubkey,
    pub update_authority: Pubkey,
}

/// Build a `CreateMetadataAccountV3` instruction.
pub fn create_metadata_accounts_v3(
    accounts: &CreateMetadataAccounts,
    args: &CreateMetadataAccountArgsV3,
) -> Result<Instruction, std::io::Error> {
    let mut data = vec![CREATE_METADATA_ACCOUNT_V3];
    data.extend(borsh::to_vec(args)?);

    Ok(Instruction {
        program_id: METADATA_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(accounts.metadata, false),
            AccountMeta::new_readonly(accounts.mint, false),
            AccountMeta::new_readonly(accounts.mint_authority, true),
            AccountMeta::new(accounts.payer, true),
            AccountMeta::new_readonly(accounts.update_authority, true),
            AccountMeta::new_readonly(solana_system_interface::program::ID, false),
        ],
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts() -> CreateMetadataAccounts {
        let mint = Pubkey::new_unique();
        let payer = Pubkey::new_unique();
        CreateMetadataAccounts {
            metadata: find_metadata_address(&mint),
            mint,
            mint_authority: payer,
            payer,
            update_authority: payer,
        }
    }

    #[test]
    fn test_metadata_address_is_pda() {
        let mint = Pubkey::new_unique();
        let metadata = find_metadata_address(&mint);
        assert!(!metadata.is_on_curve());
        assert_eq!(metadata, find_metadata_address(&mint));
    }

    #[test]
    fn test_instruction_layout() {
        let accounts = accounts();
        let args = CreateMetadataAccountArgsV3 {
            data: DataV2::fungible("Gold", "GLD", "https://gateway.example/ipfs/Qm1"),
            is_mutable: false,
            collection_details: None,
        };
        let ix = create_metadata_accounts_v3(&accounts, &args).unwrap();

        assert_eq!(ix.program_id, METADATA_PROGRAM_ID);
        assert_eq!(ix.data[0], CREATE_METADATA_ACCOUNT_V3);
        assert_eq!(ix.accounts.len(), 6);
        assert!(ix.accounts[0].is_writable && !ix.accounts[0].is_signer);
        assert!(ix.accounts[3].is_writable && ix.accounts[3].is_signer);

        let decoded = CreateMetadataAccountArgsV3::try_from_slice(&ix.data[1..]).unwrap();
        assert_eq!(decoded, args);
    }

    #[test]
    fn test_data_layout_prefix() {
        // u32 little-endian length prefix, then the bytes
        let encoded = borsh::to_vec(&DataV2::fungible("A", "B", "C")).unwrap();
        assert_eq!(&encoded[..5], &[1, 0, 0, 0, b'A']);
        // fee (2 bytes) then three None tags
        assert_eq!(&encoded[encoded.len() - 5..], &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_check_lengths() {
        assert!(DataV2::fungible("Gold", "GLD", "u").check_lengths().is_ok());
        assert!(DataV2::fungible("x".repeat(33), "GLD", "u").check_lengths().is_err());
        assert!(DataV2::fungible("Gold", "TOOLONGSYMB", "u").check_lengths().is_err());
        assert!(DataV2::fungible("Gold", "GLD", "u".repeat(201)).check_lengths().is_err());
    }
}
