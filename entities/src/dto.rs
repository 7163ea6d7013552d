//! Request and response bodies of the relay HTTP API.
use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_HEALTHY: &str = "healthy";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTxResponse {
    /// BASE64 encoded bincode serialized versioned transaction
    pub unsigned_tx: String,
    /// BASE58 encoded 64 bytes keypair of the new token
    pub mint_keypair: String,
    pub mint_public_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastTxRequest {
    /// BASE64 encoded bincode serialized versioned transaction, all signatures in place
    pub signed_tx: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastTxResponse {
    pub status: String,
    pub signature: String,
    pub transaction_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadImageRequest {
    /// Data URI, e.g. `data:image/png;base64,...`
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadImageResponse {
    pub token: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
