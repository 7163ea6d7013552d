use entities::token::{BroadcastResult, CreateTokenRequest, TransactionDraft};
use solana_sdk::transaction::VersionedTransaction;

#[async_trait::async_trait]
pub trait TokenService {
    /// Generates a mint keypair, registers the token metadata upstream
    /// and returns the unsigned create transaction for it.
    async fn create_token_transaction(&self, req: CreateTokenRequest) -> anyhow::Result<TransactionDraft>;

    /// Relays a fully signed transaction to the network.
    async fn broadcast_transaction(&self, tx: VersionedTransaction) -> anyhow::Result<BroadcastResult>;
}
