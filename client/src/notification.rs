use solana_sdk::pubkey::Pubkey;

/// Progress of a token launch, delivered in the order the steps happen.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Connecting,
    Connected { public_key: Pubkey },
    CreatingTransaction,
    Signing,
    Broadcasting,
    Success { signature: String, transaction_url: String, mint_public_key: String },
    /// Terminal, nothing follows it for the same launch
    Error { message: String },
}

impl Notification {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Notification::Success { .. } | Notification::Error { .. })
    }
}
