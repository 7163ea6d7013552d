use base64::engine::general_purpose::STANDARD;
use base64::engine::GeneralPurpose;
use base64::Engine;
use thiserror::Error;

const BASE64_ENGINE: GeneralPurpose = STANDARD;
const DATA_URI_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImageDecodeError {
    #[error("Image cannot be empty")]
    Empty,
    #[error("Image data URI must be base64 encoded")]
    NotBase64DataUri,
    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(String),
}

/// Decodes an image sent as text.
///
/// Accepts either a data URI (`data:image/png;base64,iVBORw0...`)
/// or a bare base64 string, as browsers produce both depending on how the file was read.
pub fn decode_image(encoded: &str) -> Result<Vec<u8>, ImageDecodeError> {
    let encoded = encoded.trim();

    let payload = match encoded.strip_prefix(DATA_URI_PREFIX) {
        Some(rest) => {
            let (header, data) = rest.split_once(',').ok_or(ImageDecodeError::NotBase64DataUri)?;
            if !header.ends_with(BASE64_MARKER) {
                return Err(ImageDecodeError::NotBase64DataUri);
            }
            data
        }
        None => encoded,
    };

    if payload.is_empty() {
        return Err(ImageDecodeError::Empty);
    }

    BASE64_ENGINE
        .decode(payload)
        .map_err(|e| ImageDecodeError::InvalidBase64(e.to_string()))
}

pub fn encode_image(bytes: &[u8]) -> String {
    BASE64_ENGINE.encode(bytes)
}
