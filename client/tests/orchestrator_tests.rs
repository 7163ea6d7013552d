use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use client::{
    error::ClientError,
    notification::Notification,
    orchestrator::TokenLaunchClient,
    relay::{LaunchParams, RelayApi},
    wallet::{KeypairWallet, WalletProvider},
};
use entities::dto::{BroadcastTxResponse, CreateTxResponse, STATUS_SUCCESS};
use solana_sdk::{
    message::{Message, VersionedMessage},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    system_instruction,
    transaction::VersionedTransaction,
};
use tokio::sync::mpsc::UnboundedReceiver;
use util::transaction::{decode_transaction, encode_transaction, missing_signatures};

#[derive(Default)]
struct FakeRelay {
    fail_create: Option<String>,
    broadcasts: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl RelayApi for FakeRelay {
    async fn create_tx(&self, _params: &LaunchParams, user_public_key: &Pubkey) -> anyhow::Result<CreateTxResponse> {
        if let Some(message) = &self.fail_create {
            anyhow::bail!(ClientError::Relay(message.clone()));
        }

        let mint = Keypair::new();
        let ix = system_instruction::create_account(user_public_key, &mint.pubkey(), 1_000_000, 82, user_public_key);
        let message = Message::new(&[ix], Some(user_public_key));
        let tx = VersionedTransaction {
            signatures: vec![Signature::default(); 2],
            message: VersionedMessage::Legacy(message),
        };

        Ok(CreateTxResponse {
            unsigned_tx: encode_transaction(&tx)?,
            mint_keypair: mint.to_base58_string(),
            mint_public_key: mint.pubkey().to_string(),
        })
    }

    async fn broadcast_tx(&self, signed_tx: &str) -> anyhow::Result<BroadcastTxResponse> {
        self.broadcasts.fetch_add(1, Ordering::SeqCst);

        let tx = decode_transaction(signed_tx)?;
        assert_eq!(missing_signatures(&tx), 0);
        assert!(tx.verify_with_results().into_iter().all(|ok| ok));

        let signature = tx.signatures[0].to_string();
        Ok(BroadcastTxResponse {
            status: STATUS_SUCCESS.to_string(),
            transaction_url: format!("https://solscan.io/tx/{signature}"),
            signature,
        })
    }
}

/// Connects fine but refuses to sign, like a user rejecting the wallet popup.
struct RejectingWallet {
    public_key: Pubkey,
}

#[async_trait::async_trait]
impl WalletProvider for RejectingWallet {
    async fn connect(&self) -> anyhow::Result<Pubkey> {
        Ok(self.public_key)
    }

    async fn sign_transaction(&self, _tx: VersionedTransaction) -> anyhow::Result<VersionedTransaction> {
        anyhow::bail!("User rejected the request.")
    }
}

struct UnavailableWallet;

#[async_trait::async_trait]
impl WalletProvider for UnavailableWallet {
    async fn connect(&self) -> anyhow::Result<Pubkey> {
        anyhow::bail!("Wallet extension not found")
    }

    async fn sign_transaction(&self, tx: VersionedTransaction) -> anyhow::Result<VersionedTransaction> {
        Ok(tx)
    }
}

fn params() -> LaunchParams {
    LaunchParams {
        name: "example".to_string(),
        symbol: "EX".to_string(),
        description: Some("This is an example".to_string()),
        image: vec![0x89, b'P', b'N', b'G'],
        amount: None,
    }
}

fn drain(receiver: &mut UnboundedReceiver<Notification>) -> Vec<Notification> {
    let mut notifications = Vec::new();
    while let Ok(notification) = receiver.try_recv() {
        notifications.push(notification);
    }
    notifications
}

fn errors(notifications: &[Notification]) -> Vec<&Notification> {
    notifications
        .iter()
        .filter(|n| matches!(n, Notification::Error { .. }))
        .collect()
}

#[tokio::test]
async fn test_successful_launch() {
    let user = Keypair::new();
    let user_pubkey = user.pubkey();
    let relay = FakeRelay::default();
    let broadcasts = relay.broadcasts.clone();
    let (client, mut receiver) = TokenLaunchClient::new(KeypairWallet::new(user), relay);

    let response = client.launch_token(params()).await.unwrap();

    assert_eq!(response.status, STATUS_SUCCESS);
    assert_eq!(broadcasts.load(Ordering::SeqCst), 1);
    assert_eq!(client.public_key(), Some(user_pubkey));

    let notifications = drain(&mut receiver);
    assert_eq!(notifications.len(), 6);
    assert_eq!(notifications[0], Notification::Connecting);
    assert_eq!(notifications[1], Notification::Connected { public_key: user_pubkey });
    assert_eq!(notifications[2], Notification::CreatingTransaction);
    assert_eq!(notifications[3], Notification::Signing);
    assert_eq!(notifications[4], Notification::Broadcasting);
    assert!(matches!(
        &notifications[5],
        Notification::Success { signature, .. } if *signature == response.signature
    ));
}

#[tokio::test]
async fn test_signing_failure_never_broadcasts() {
    let relay = FakeRelay::default();
    let broadcasts = relay.broadcasts.clone();
    let wallet = RejectingWallet { public_key: Pubkey::new_unique() };
    let (client, mut receiver) = TokenLaunchClient::new(wallet, relay);

    let err = client.launch_token(params()).await.unwrap_err();

    assert!(matches!(err, ClientError::Wallet(_)));
    assert_eq!(broadcasts.load(Ordering::SeqCst), 0);

    let notifications = drain(&mut receiver);
    let errors = errors(&notifications);
    assert_eq!(errors.len(), 1);
    assert_eq!(notifications.last(), Some(errors[0]));
    assert!(!notifications.contains(&Notification::Broadcasting));
    assert!(matches!(errors[0], Notification::Error { message } if message.contains("User rejected the request.")));
}

#[tokio::test]
async fn test_relay_failure_keeps_upstream_message() {
    let relay = FakeRelay { fail_create: Some("IPFS upload failed: 500 - busy".to_string()), ..Default::default() };
    let broadcasts = relay.broadcasts.clone();
    let (client, mut receiver) = TokenLaunchClient::new(KeypairWallet::new(Keypair::new()), relay);

    client.launch_token(params()).await.unwrap_err();

    let notifications = drain(&mut receiver);
    assert_eq!(
        notifications.last(),
        Some(&Notification::Error { message: "IPFS upload failed: 500 - busy".to_string() })
    );
    assert_eq!(errors(&notifications).len(), 1);
    assert!(!notifications.contains(&Notification::Signing));
    assert_eq!(broadcasts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_connect_failure() {
    let (client, mut receiver) = TokenLaunchClient::new(UnavailableWallet, FakeRelay::default());

    let err = client.connect_wallet().await.unwrap_err();

    assert!(err.to_string().contains("Wallet extension not found"));
    assert_eq!(client.public_key(), None);
    let notifications = drain(&mut receiver);
    assert_eq!(notifications.first(), Some(&Notification::Connecting));
    assert_eq!(errors(&notifications).len(), 1);
    assert!(notifications.last().unwrap().is_terminal());
}

#[tokio::test]
async fn test_connected_wallet_is_reused() {
    let (client, mut receiver) = TokenLaunchClient::new(KeypairWallet::new(Keypair::new()), FakeRelay::default());
    client.connect_wallet().await.unwrap();
    drain(&mut receiver);

    client.launch_token(params()).await.unwrap();

    let notifications = drain(&mut receiver);
    assert_eq!(notifications.first(), Some(&Notification::CreatingTransaction));
    assert!(!notifications.contains(&Notification::Connecting));
}

#[tokio::test]
async fn test_concurrent_launches_on_one_client() {
    let relay = FakeRelay::default();
    let broadcasts = relay.broadcasts.clone();
    let (client, mut receiver) = TokenLaunchClient::new(KeypairWallet::new(Keypair::new()), relay);
    client.connect_wallet().await.unwrap();
    drain(&mut receiver);

    let (first, second) = tokio::join!(client.launch_token(params()), client.launch_token(params()));

    let (first, second) = (first.unwrap(), second.unwrap());
    assert_ne!(first.signature, second.signature);
    assert_eq!(broadcasts.load(Ordering::SeqCst), 2);

    let notifications = drain(&mut receiver);
    let terminal: Vec<_> = notifications.iter().filter(|n| n.is_terminal()).collect();
    assert_eq!(terminal.len(), 2);
    assert!(terminal.iter().all(|n| matches!(n, Notification::Success { .. })));
    assert!(errors(&notifications).is_empty());
}
