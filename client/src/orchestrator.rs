use std::sync::Mutex;

use entities::dto::BroadcastTxResponse;
use solana_sdk::{pubkey::Pubkey, signature::Keypair};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};
use util::transaction::{decode_transaction, encode_transaction, sign_in_slot};

use crate::{
    error::ClientError,
    notification::Notification,
    relay::{LaunchParams, RelayApi},
    wallet::WalletProvider,
};

/// Runs the launch flow: connect, create, sign, broadcast.
///
/// Steps run strictly one after another. The first failing step ends the flow with a single
/// [`Notification::Error`], later steps are skipped and the mint keypair is dropped.
/// Nothing prevents starting a second launch while one is still pending.
pub struct TokenLaunchClient<W, R> {
    wallet: W,
    relay: R,
    public_key: Mutex<Option<Pubkey>>,
    notifications: UnboundedSender<Notification>,
}

impl<W, R> TokenLaunchClient<W, R>
where
    W: WalletProvider + Send + Sync,
    R: RelayApi + Send + Sync,
{
    pub fn new(wallet: W, relay: R) -> (Self, UnboundedReceiver<Notification>) {
        let (notifications, receiver) = unbounded_channel();
        let client = TokenLaunchClient { wallet, relay, public_key: Mutex::new(None), notifications };
        (client, receiver)
    }

    pub fn public_key(&self) -> Option<Pubkey> {
        *self.public_key.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub async fn connect_wallet(&self) -> Result<Pubkey, ClientError> {
        self.connect().await.inspect_err(|e| self.fail(e))
    }

    pub async fn launch_token(&self, params: LaunchParams) -> Result<BroadcastTxResponse, ClientError> {
        match self.run(params).await {
            Ok((response, mint_public_key)) => {
                self.notify(Notification::Success {
                    signature: response.signature.clone(),
                    transaction_url: response.transaction_url.clone(),
                    mint_public_key,
                });
                Ok(response)
            }
            Err(e) => {
                self.fail(&e);
                Err(e)
            }
        }
    }

    async fn run(&self, params: LaunchParams) -> Result<(BroadcastTxResponse, String), ClientError> {
        let public_key = match self.public_key() {
            Some(public_key) => public_key,
            None => self.connect().await?,
        };

        self.notify(Notification::CreatingTransaction);
        let draft = self
            .relay
            .create_tx(&params, &public_key)
            .await
            .map_err(|e| ClientError::Relay(e.to_string()))?;

        self.notify(Notification::Signing);
        let mut tx = decode_transaction(&draft.unsigned_tx)
            .map_err(|e| ClientError::MalformedTransaction(e.to_string()))?;
        let mint_keypair = decode_keypair(&draft.mint_keypair)?;
        sign_in_slot(&mut tx, &mint_keypair)?;
        let tx = self
            .wallet
            .sign_transaction(tx)
            .await
            .map_err(|e| ClientError::Wallet(e.to_string()))?;
        let signed_tx =
            encode_transaction(&tx).map_err(|e| ClientError::MalformedTransaction(e.to_string()))?;

        self.notify(Notification::Broadcasting);
        let response = self
            .relay
            .broadcast_tx(&signed_tx)
            .await
            .map_err(|e| ClientError::Relay(e.to_string()))?;

        Ok((response, draft.mint_public_key))
    }

    async fn connect(&self) -> Result<Pubkey, ClientError> {
        self.notify(Notification::Connecting);
        let public_key = self
            .wallet
            .connect()
            .await
            .map_err(|e| ClientError::Wallet(e.to_string()))?;

        *self.public_key.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(public_key);
        self.notify(Notification::Connected { public_key });

        Ok(public_key)
    }

    fn fail(&self, e: &ClientError) {
        error!("Token launch failed: {e}");
        self.notify(Notification::Error { message: e.to_string() });
    }

    fn notify(&self, notification: Notification) {
        debug!("{notification:?}");
        // Nobody listening is fine, the caller may only care about the returned result
        let _ = self.notifications.send(notification);
    }
}

fn decode_keypair(encoded: &str) -> Result<Keypair, ClientError> {
    let bytes = bs58::decode(encoded)
        .into_vec()
        .map_err(|_| ClientError::MalformedMintKeypair)?;
    Keypair::from_bytes(&bytes).map_err(|_| ClientError::MalformedMintKeypair)
}
