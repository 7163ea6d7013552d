use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use thiserror::Error;

#[async_trait::async_trait]
pub trait L1Service {
    /// Submits a fully signed transaction to Solana and returns its signature.
    /// The transaction is not awaited to be confirmed, only the preflight check
    /// has to pass.
    async fn broadcast_transaction(&self, tx: &VersionedTransaction) -> anyhow::Result<Signature>;
}

#[derive(Error, Debug)]
pub enum BroadcastError {
    #[error("Transaction is missing {0} signature(s)")]
    MissingSignatures(usize),
    #[error("{0}")]
    Rejected(String),
}
