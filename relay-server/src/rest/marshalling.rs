use std::collections::HashMap;
use std::str::FromStr;

use actix_multipart::Multipart;
use entities::token::CreateTokenRequest;
use futures::TryStreamExt;
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;
use util::base64_encode_decode::{decode_image, ImageDecodeError};

const NAME: &str = "name";
const SYMBOL: &str = "symbol";
const TICKER: &str = "ticker";
const DESCRIPTION: &str = "description";
const IMAGE: &str = "image";
const AMOUNT: &str = "amount";
const USER_PUBLIC_KEY: &str = "user_public_key";

/// Upper bound for a single request payload, JSON body or multipart field.
pub const PAYLOAD_LIMIT: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("Field '{0}' is not valid UTF-8")]
    NotUtf8(String),
    #[error("Invalid amount: '{0}'")]
    InvalidAmount(String),
    #[error("Invalid user_public_key: '{0}'")]
    InvalidPublicKey(String),
    #[error(transparent)]
    Image(#[from] ImageDecodeError),
    #[error("Malformed multipart payload: {0}")]
    Multipart(String),
    #[error("Field '{0}' exceeds {1} bytes")]
    FieldTooLarge(String, usize),
}

/// Raw content of a single multipart field.
#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub bytes: Vec<u8>,
    /// Set for file uploads, i.e. parts that carry a filename
    pub is_file: bool,
}

impl FormField {
    pub fn text(value: &str) -> FormField {
        FormField { bytes: value.as_bytes().to_vec(), is_file: false }
    }

    pub fn file(bytes: Vec<u8>) -> FormField {
        FormField { bytes, is_file: true }
    }
}

/// Reads the whole `/create_tx` form and validates it.
pub async fn read_create_token_form(mut payload: Multipart) -> Result<CreateTokenRequest, FormError> {
    let mut fields = HashMap::new();

    while let Some(mut field) = payload.try_next().await.map_err(|e| FormError::Multipart(e.to_string()))? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let is_file = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .is_some();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(|e| FormError::Multipart(e.to_string()))? {
            append_limited(&mut bytes, &chunk, &name, PAYLOAD_LIMIT)?;
        }

        fields.insert(name, FormField { bytes, is_file });
    }

    create_token_request(fields)
}

pub fn create_token_request(mut fields: HashMap<String, FormField>) -> Result<CreateTokenRequest, FormError> {
    let name = fields.remove(NAME).ok_or(FormError::MissingField(NAME))?;
    let symbol = fields
        .remove(SYMBOL)
        .or_else(|| fields.remove(TICKER))
        .ok_or(FormError::MissingField(SYMBOL))?;
    let image = fields.remove(IMAGE).ok_or(FormError::MissingField(IMAGE))?;
    let user_public_key = fields
        .remove(USER_PUBLIC_KEY)
        .ok_or(FormError::MissingField(USER_PUBLIC_KEY))?;

    let name = required_text(NAME, name, "Name")?;
    let symbol = required_text(SYMBOL, symbol, "Symbol")?;
    let description = fields
        .remove(DESCRIPTION)
        .map(|field| text(DESCRIPTION, field))
        .transpose()?
        .unwrap_or_default();

    let image = if image.is_file {
        if image.bytes.is_empty() {
            return Err(ImageDecodeError::Empty.into());
        }
        image.bytes
    } else {
        decode_image(&text(IMAGE, image)?)?
    };

    let amount = fields
        .remove(AMOUNT)
        .map(|field| text(AMOUNT, field))
        .transpose()?
        .map(|value| parse_amount(&value))
        .transpose()?
        .unwrap_or(0.0);

    let user_public_key = text(USER_PUBLIC_KEY, user_public_key)?;
    let user_public_key =
        Pubkey::from_str(&user_public_key).map_err(|_| FormError::InvalidPublicKey(user_public_key.clone()))?;

    Ok(CreateTokenRequest { name, symbol, description, image, amount, user_public_key })
}

fn append_limited(bytes: &mut Vec<u8>, chunk: &[u8], field_name: &str, limit: usize) -> Result<(), FormError> {
    if bytes.len() + chunk.len() > limit {
        return Err(FormError::FieldTooLarge(field_name.to_string(), limit));
    }
    bytes.extend_from_slice(chunk);
    Ok(())
}

fn text(field_name: &str, field: FormField) -> Result<String, FormError> {
    String::from_utf8(field.bytes)
        .map(|value| value.trim().to_string())
        .map_err(|_| FormError::NotUtf8(field_name.to_string()))
}

fn required_text(field_name: &str, field: FormField, label: &'static str) -> Result<String, FormError> {
    let value = text(field_name, field)?;
    if value.is_empty() {
        return Err(FormError::EmptyField(label));
    }
    Ok(value)
}

fn parse_amount(value: &str) -> Result<f64, FormError> {
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(FormError::InvalidAmount(value.to_string())),
    }
}
