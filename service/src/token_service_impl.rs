use std::sync::Arc;

use entities::token::{BroadcastResult, CreateTokenRequest, TransactionDraft};
use interfaces::{
    l1_service::L1Service,
    launch_api::{TokenLaunchApi, UpstreamError},
    token_service::TokenService,
};
use solana_sdk::{signature::Keypair, signer::Signer, transaction::VersionedTransaction};
use tracing::info;
use util::transaction::deserialize_transaction;

#[derive(Clone)]
pub struct TokenServiceImpl {
    pub launch_api: Arc<dyn TokenLaunchApi + Sync + Send>,
    pub l1_service: Arc<dyn L1Service + Sync + Send>,
    /// Signature is appended to it, e.g. `https://solscan.io/tx`
    pub explorer_tx_url: String,
}

impl TokenServiceImpl {
    pub fn transaction_url(&self, signature: &str) -> String {
        format!("{}/{}", self.explorer_tx_url.trim_end_matches('/'), signature)
    }
}

#[async_trait::async_trait]
impl TokenService for TokenServiceImpl {
    async fn create_token_transaction(&self, req: CreateTokenRequest) -> anyhow::Result<TransactionDraft> {
        let mint_keypair = Keypair::new();
        let mint_pubkey = mint_keypair.pubkey();

        let CreateTokenRequest { name, symbol, description, image, amount, user_public_key } = req;

        let metadata = self
            .launch_api
            .upload_metadata(&name, &symbol, &description, image)
            .await?;

        let unsigned_tx = self
            .launch_api
            .create_transaction(&metadata, &mint_pubkey, &user_public_key, amount)
            .await?;

        // Whatever the API returned has to be a transaction the client is able to sign
        deserialize_transaction(&unsigned_tx).map_err(|e| UpstreamError::MalformedTransaction(e.to_string()))?;

        info!("Prepared create transaction for '{symbol}', mint '{mint_pubkey}', payer '{user_public_key}'");

        Ok(TransactionDraft {
            unsigned_tx,
            mint_keypair: mint_keypair.to_bytes().to_vec(),
            mint_public_key: mint_pubkey.to_string(),
        })
    }

    async fn broadcast_transaction(&self, tx: VersionedTransaction) -> anyhow::Result<BroadcastResult> {
        let signature = self.l1_service.broadcast_transaction(&tx).await?.to_string();
        let transaction_url = self.transaction_url(&signature);

        Ok(BroadcastResult { signature, transaction_url })
    }
}
