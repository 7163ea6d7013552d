use thiserror::Error;
use util::transaction::SignError;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Wallet error: {0}")]
    Wallet(String),
    #[error("{0}")]
    Relay(String),
    #[error("Relay returned a malformed transaction: {0}")]
    MalformedTransaction(String),
    #[error("Relay returned a malformed mint keypair")]
    MalformedMintKeypair,
    #[error("Failed to sign transaction: {0}")]
    Sign(#[from] SignError),
}
