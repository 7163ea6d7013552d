use entities::token::TokenMetadata;
use interfaces::launch_api::{TokenLaunchApi, UpstreamError};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use tracing::{error, info};
use util::config::Upstream;

const IMAGE_MIME: &str = "image/png";

/// Client of pump.fun IPFS upload and the PumpPortal local transaction builder.
#[derive(Clone, Debug)]
pub struct PumpPortalClient {
    http_client: reqwest::Client,
    cfg: Upstream,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IpfsUploadResponse {
    metadata_uri: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateTransactionRequest<'a> {
    public_key: String,
    action: &'static str,
    token_metadata: &'a TokenMetadata,
    mint: String,
    denominated_in_sol: &'static str,
    amount: String,
    slippage: f64,
    priority_fee: f64,
    pool: &'a str,
    is_mayhem_mode: &'static str,
}

impl PumpPortalClient {
    pub fn new(cfg: &Upstream) -> PumpPortalClient {
        PumpPortalClient { http_client: reqwest::Client::new(), cfg: cfg.clone() }
    }
}

#[async_trait::async_trait]
impl TokenLaunchApi for PumpPortalClient {
    async fn upload_metadata(
        &self,
        name: &str,
        symbol: &str,
        description: &str,
        image: Vec<u8>,
    ) -> anyhow::Result<TokenMetadata> {
        let file_part = Part::bytes(image)
            .file_name(format!("{symbol}.png"))
            .mime_str(IMAGE_MIME)?;

        let form = Form::new()
            .text("name", name.to_string())
            .text("symbol", symbol.to_string())
            .text("description", description.to_string())
            .text("showName", "true")
            .part("file", file_part);

        let response = self
            .http_client
            .post(&self.cfg.ipfs_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            error!("IPFS upload failed: {status} - {body}");
            anyhow::bail!(UpstreamError::IpfsUpload { status: status.as_u16(), body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let IpfsUploadResponse { metadata_uri } =
            serde_json::from_str(&body).map_err(|e| UpstreamError::MalformedIpfsResponse(e.to_string()))?;

        info!("Token metadata uploaded: '{metadata_uri}'");

        Ok(TokenMetadata { name: name.to_string(), symbol: symbol.to_string(), uri: metadata_uri })
    }

    async fn create_transaction(
        &self,
        metadata: &TokenMetadata,
        mint: &Pubkey,
        payer: &Pubkey,
        amount: f64,
    ) -> anyhow::Result<Vec<u8>> {
        let request = CreateTransactionRequest {
            public_key: payer.to_string(),
            action: "create",
            token_metadata: metadata,
            mint: mint.to_string(),
            denominated_in_sol: "true",
            amount: amount.to_string(),
            slippage: self.cfg.slippage,
            priority_fee: self.cfg.priority_fee,
            pool: &self.cfg.pool,
            is_mayhem_mode: "false",
        };

        let response = self
            .http_client
            .post(&self.cfg.trade_local_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            error!("Create transaction request failed: {status} - {body}");
            anyhow::bail!(UpstreamError::CreateTransaction { status: status.as_u16(), body });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        info!("Received unsigned create transaction for mint '{mint}', {} bytes", bytes.len());

        Ok(bytes.to_vec())
    }
}

/// Text of a failed upstream response. Falls back to the status line when
/// the body is empty or cannot be read, so the caller never gets a blank message.
async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body,
        Ok(_) => status.to_string(),
        Err(e) => format!("{status}: failed to read response body: {e}"),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upstream_cfg(server: &MockServer) -> Upstream {
        Upstream {
            ipfs_url: format!("{}/api/ipfs", server.uri()),
            trade_local_url: format!("{}/api/trade-local", server.uri()),
            slippage: 10.0,
            priority_fee: 0.0005,
            pool: "pump".to_string(),
        }
    }

    fn metadata() -> TokenMetadata {
        TokenMetadata {
            name: "example".to_string(),
            symbol: "EX".to_string(),
            uri: "https://ipfs.io/ipfs/QmExample".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upload_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ipfs"))
            .and(body_string_contains("filename=\"EX.png\""))
            .and(body_string_contains("name=\"symbol\"\r\n\r\nEX\r\n"))
            .and(body_string_contains("name=\"showName\"\r\n\r\ntrue\r\n"))
            .and(body_string_contains("This is an example"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "metadataUri": "https://ipfs.io/ipfs/QmExample" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = PumpPortalClient::new(&upstream_cfg(&server));
        let result = client
            .upload_metadata("example", "EX", "This is an example", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(result, metadata());
    }

    #[tokio::test]
    async fn test_upload_metadata_failure_keeps_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ipfs"))
            .respond_with(ResponseTemplate::new(413).set_body_string("file too large"))
            .mount(&server)
            .await;

        let client = PumpPortalClient::new(&upstream_cfg(&server));
        let err = client.upload_metadata("example", "EX", "", vec![0; 8]).await.unwrap_err();

        assert!(err.to_string().contains("file too large"));
        assert!(matches!(
            err.downcast_ref::<UpstreamError>(),
            Some(UpstreamError::IpfsUpload { status: 413, .. })
        ));
    }

    #[tokio::test]
    async fn test_upload_metadata_without_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/ipfs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "unexpected": true })))
            .mount(&server)
            .await;

        let client = PumpPortalClient::new(&upstream_cfg(&server));
        let err = client.upload_metadata("example", "EX", "", vec![0; 8]).await.unwrap_err();

        assert!(matches!(err.downcast_ref::<UpstreamError>(), Some(UpstreamError::MalformedIpfsResponse(_))));
    }

    #[tokio::test]
    async fn test_create_transaction() {
        let server = MockServer::start().await;
        let (mint, payer) = (Pubkey::new_unique(), Pubkey::new_unique());
        Mock::given(method("POST"))
            .and(path("/api/trade-local"))
            .and(body_partial_json(json!({
                "publicKey": payer.to_string(),
                "action": "create",
                "mint": mint.to_string(),
                "denominatedInSol": "true",
                "amount": "0.5",
                "pool": "pump",
                "slippage": 10.0,
                "priorityFee": 0.0005,
                "isMayhemMode": "false",
                "tokenMetadata": { "name": "example", "symbol": "EX", "uri": "https://ipfs.io/ipfs/QmExample" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![9u8, 8, 7]))
            .expect(1)
            .mount(&server)
            .await;

        let client = PumpPortalClient::new(&upstream_cfg(&server));
        let bytes = client.create_transaction(&metadata(), &mint, &payer, 0.5).await.unwrap();

        assert_eq!(bytes, vec![9u8, 8, 7]);
    }

    #[tokio::test]
    async fn test_create_transaction_failure_keeps_upstream_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trade-local"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Bad Request: invalid publicKey"))
            .mount(&server)
            .await;

        let client = PumpPortalClient::new(&upstream_cfg(&server));
        let err = client
            .create_transaction(&metadata(), &Pubkey::new_unique(), &Pubkey::new_unique(), 0.0)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Bad Request: invalid publicKey");
    }

    #[tokio::test]
    async fn test_create_transaction_failure_with_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/trade-local"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = PumpPortalClient::new(&upstream_cfg(&server));
        let err = client
            .create_transaction(&metadata(), &Pubkey::new_unique(), &Pubkey::new_unique(), 0.0)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "502 Bad Gateway");
        assert!(matches!(
            err.downcast_ref::<UpstreamError>(),
            Some(UpstreamError::CreateTransaction { status: 502, .. })
        ));
    }
}
