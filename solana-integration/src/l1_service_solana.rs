use std::sync::Arc;

use interfaces::l1_service::{BroadcastError, L1Service};

use solana_client::nonblocking::rpc_client::{self, RpcClient};
use solana_rpc_client_api::config::RpcSendTransactionConfig;
use solana_sdk::commitment_config::CommitmentLevel;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use tracing::{error, info, warn};
use util::str_util::mask_url_secrets;
use util::transaction::missing_signatures;

/// Markers of the preflight failure Solana reports when the fee payer holds no SOL.
const UNFUNDED_PAYER_MARKERS: [&str; 2] = ["AccountNotFound", "no record of a prior credit"];

pub struct SolanaService {
    client: Arc<RpcClient>,
}

impl SolanaService {
    pub fn new(solana_url: &str) -> SolanaService {
        info!("Using Solana RPC: '{}'", mask_url_secrets(solana_url));
        SolanaService { client: Arc::new(rpc_client::RpcClient::new(solana_url.to_string())) }
    }

    fn send_config() -> RpcSendTransactionConfig {
        RpcSendTransactionConfig { preflight_commitment: Some(CommitmentLevel::Confirmed), ..Default::default() }
    }
}

#[async_trait::async_trait]
impl L1Service for SolanaService {
    async fn broadcast_transaction(&self, tx: &VersionedTransaction) -> anyhow::Result<Signature> {
        let missing = missing_signatures(tx);
        if missing > 0 {
            anyhow::bail!(BroadcastError::MissingSignatures(missing));
        }

        match self.client.send_transaction_with_config(tx, Self::send_config()).await {
            Ok(signature) => {
                info!("Transaction sent: {signature}");
                Ok(signature)
            }
            Err(e) => {
                let message = e.to_string();
                if UNFUNDED_PAYER_MARKERS.iter().any(|marker| message.contains(marker)) {
                    let payer = tx.message.static_account_keys().first().map(|k| k.to_string());
                    warn!(
                        "Fee payer '{}' has no on-chain account yet, it has to be funded first",
                        payer.as_deref().unwrap_or("unknown")
                    );
                }
                error!("Failed to send transaction: {message}");
                anyhow::bail!(BroadcastError::Rejected(message))
            }
        }
    }
}
