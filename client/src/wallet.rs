use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer, transaction::VersionedTransaction};
use util::transaction::sign_in_slot;

use crate::error::ClientError;

/// Wallet holding the key of the user who pays for the token creation.
#[async_trait::async_trait]
pub trait WalletProvider {
    /// Asks the wallet for access and returns the public key it exposes.
    async fn connect(&self) -> anyhow::Result<Pubkey>;

    /// Adds the wallet's signature to the transaction.
    /// Signatures already present must be kept.
    async fn sign_transaction(&self, tx: VersionedTransaction) -> anyhow::Result<VersionedTransaction>;
}

/// Wallet backed by a keypair held in memory.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> KeypairWallet {
        KeypairWallet { keypair }
    }

    /// Accepts the 64 bytes keypair in base58, the format wallets export private keys in.
    pub fn from_base58(private_key: &str) -> Result<KeypairWallet, ClientError> {
        let bytes = bs58::decode(private_key.trim())
            .into_vec()
            .map_err(|e| ClientError::Wallet(e.to_string()))?;
        let keypair = Keypair::from_bytes(&bytes).map_err(|e| ClientError::Wallet(e.to_string()))?;
        Ok(KeypairWallet::new(keypair))
    }
}

#[async_trait::async_trait]
impl WalletProvider for KeypairWallet {
    async fn connect(&self) -> anyhow::Result<Pubkey> {
        Ok(self.keypair.pubkey())
    }

    async fn sign_transaction(&self, mut tx: VersionedTransaction) -> anyhow::Result<VersionedTransaction> {
        sign_in_slot(&mut tx, &self.keypair)?;
        Ok(tx)
    }
}
