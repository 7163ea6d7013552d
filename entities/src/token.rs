use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

/// Everything the relay needs to ask the launch API for a create transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTokenRequest {
    /// Token name
    pub name: String,

    /// Token ticker
    pub symbol: String,

    /// Free-form description, may be empty
    pub description: String,

    /// Raw image bytes that end up on IPFS
    pub image: Vec<u8>,

    /// Initial buy, denominated in SOL
    pub amount: f64,

    /// Wallet that pays for the creation and signs as fee payer
    pub user_public_key: Pubkey,
}

/// Metadata registered on IPFS before the create transaction is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    pub name: String,
    pub symbol: String,
    pub uri: String,
}

/// Unsigned create transaction together with the mint key it was built for.
///
/// Nothing of this is kept by the server, the caller carries it through signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDraft {
    /// Bincode serialized `VersionedTransaction`, as returned by the launch API
    pub unsigned_tx: Vec<u8>,

    /// 64 bytes: secret key followed by public key
    pub mint_keypair: Vec<u8>,

    /// Base58 encoded mint address
    pub mint_public_key: String,
}

impl TransactionDraft {
    pub fn mint_keypair_bs58(&self) -> String {
        bs58::encode(&self.mint_keypair).into_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResult {
    pub signature: String,
    pub transaction_url: String,
}
