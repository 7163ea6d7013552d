use base64::{prelude::BASE64_STANDARD, Engine};
use solana_sdk::{
    signature::Signature,
    signer::{Signer, SignerError},
    transaction::VersionedTransaction,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignError {
    #[error("{0} is not a required signer of the transaction")]
    NotARequiredSigner(String),
    #[error(transparent)]
    Signer(#[from] SignerError),
}

pub fn decode_transaction(base64_encoded: &str) -> anyhow::Result<VersionedTransaction> {
    let bytes = BASE64_STANDARD.decode(base64_encoded.trim())?;
    deserialize_transaction(&bytes)
}

pub fn deserialize_transaction(bytes: &[u8]) -> anyhow::Result<VersionedTransaction> {
    let transaction = bincode::deserialize::<VersionedTransaction>(bytes)?;
    Ok(transaction)
}

pub fn encode_transaction(tx: &VersionedTransaction) -> anyhow::Result<String> {
    let bytes = bincode::serialize(tx)?;
    Ok(BASE64_STANDARD.encode(bytes))
}

/// Signs the message and puts the signature into the slot reserved for the signer's key.
///
/// Other slots are left untouched, so a transaction can be signed by
/// several parties one after another in any order.
pub fn sign_in_slot(tx: &mut VersionedTransaction, signer: &dyn Signer) -> Result<(), SignError> {
    let pubkey = signer.try_pubkey()?;
    let required = required_signatures(tx);

    let Some(slot) = tx
        .message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| *key == pubkey)
    else {
        return Err(SignError::NotARequiredSigner(pubkey.to_string()));
    };

    if tx.signatures.len() < required {
        tx.signatures.resize(required, Signature::default());
    }

    tx.signatures[slot] = signer.try_sign_message(&tx.message.serialize())?;

    Ok(())
}

/// Number of required signatures that are still empty.
pub fn missing_signatures(tx: &VersionedTransaction) -> usize {
    let required = required_signatures(tx);
    let present = tx
        .signatures
        .iter()
        .take(required)
        .filter(|signature| **signature != Signature::default())
        .count();

    required - present
}

fn required_signatures(tx: &VersionedTransaction) -> usize {
    tx.message.header().num_required_signatures as usize
}
