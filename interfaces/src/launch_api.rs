use entities::token::TokenMetadata;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Third-party API that hosts token metadata and builds create transactions.
#[async_trait::async_trait]
pub trait TokenLaunchApi {
    /// Uploads the image together with the token description to IPFS.
    /// ## Args:
    /// * `name`, `symbol`, `description` - metadata fields as entered by the user
    /// * `image` - raw image bytes
    async fn upload_metadata(
        &self,
        name: &str,
        symbol: &str,
        description: &str,
        image: Vec<u8>,
    ) -> anyhow::Result<TokenMetadata>;

    /// Asks the API for an unsigned create transaction.
    /// Returns the bincode serialized versioned transaction exactly as it was received.
    /// ## Args:
    /// * `metadata` - result of `upload_metadata`
    /// * `mint` - address of the new token, the caller owns its keypair
    /// * `payer` - wallet that pays for the creation
    /// * `amount` - initial buy in SOL
    async fn create_transaction(
        &self,
        metadata: &TokenMetadata,
        mint: &Pubkey,
        payer: &Pubkey,
        amount: f64,
    ) -> anyhow::Result<Vec<u8>>;
}

/// Failures of the launch API. Messages carry the upstream text as is.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{0}")]
    Transport(String),
    #[error("IPFS upload failed: {status} - {body}")]
    IpfsUpload { status: u16, body: String },
    #[error("Failed to parse IPFS response: {0}")]
    MalformedIpfsResponse(String),
    #[error("{body}")]
    CreateTransaction { status: u16, body: String },
    #[error("Upstream returned a malformed transaction: {0}")]
    MalformedTransaction(String),
}
