use entities::dto::{BroadcastTxRequest, BroadcastTxResponse, CreateTxResponse, ErrorResponse};
use reqwest::multipart::{Form, Part};
use reqwest::Response;
use solana_sdk::pubkey::Pubkey;
use url::Url;

use crate::error::ClientError;

/// What the user entered on the launch form.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchParams {
    pub name: String,
    pub symbol: String,
    pub description: Option<String>,
    pub image: Vec<u8>,
    /// Initial buy in SOL
    pub amount: Option<f64>,
}

#[async_trait::async_trait]
pub trait RelayApi {
    async fn create_tx(&self, params: &LaunchParams, user_public_key: &Pubkey) -> anyhow::Result<CreateTxResponse>;

    async fn broadcast_tx(&self, signed_tx: &str) -> anyhow::Result<BroadcastTxResponse>;
}

/// Talks to the relay server over HTTP.
#[derive(Clone, Debug)]
pub struct HttpRelayApi {
    http_client: reqwest::Client,
    base_url: Url,
}

impl HttpRelayApi {
    pub fn new(base_url: &str) -> anyhow::Result<HttpRelayApi> {
        // Without the trailing slash `join` would replace the last path segment
        let base_url = if base_url.ends_with('/') { base_url.to_string() } else { format!("{base_url}/") };
        Ok(HttpRelayApi { http_client: reqwest::Client::new(), base_url: Url::parse(&base_url)? })
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait::async_trait]
impl RelayApi for HttpRelayApi {
    async fn create_tx(&self, params: &LaunchParams, user_public_key: &Pubkey) -> anyhow::Result<CreateTxResponse> {
        let image_part = Part::bytes(params.image.clone())
            .file_name("image.png")
            .mime_str("image/png")?;

        let mut form = Form::new()
            .text("name", params.name.clone())
            .text("symbol", params.symbol.clone())
            .text("user_public_key", user_public_key.to_string())
            .part("image", image_part);
        if let Some(description) = &params.description {
            form = form.text("description", description.clone());
        }
        if let Some(amount) = params.amount {
            form = form.text("amount", amount.to_string());
        }

        let response = self
            .http_client
            .post(self.endpoint("create_tx")?)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Relay(e.to_string()))?;

        Ok(parse_response(response).await?)
    }

    async fn broadcast_tx(&self, signed_tx: &str) -> anyhow::Result<BroadcastTxResponse> {
        let response = self
            .http_client
            .post(self.endpoint("broadcast_tx")?)
            .json(&BroadcastTxRequest { signed_tx: signed_tx.to_string() })
            .send()
            .await
            .map_err(|e| ClientError::Relay(e.to_string()))?;

        Ok(parse_response(response).await?)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await.map_err(|e| ClientError::Relay(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error)
            .unwrap_or_else(|_| format!("Relay responded with {status}: {body}"));
        return Err(ClientError::Relay(message));
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Relay(e.to_string()))
}
