pub mod base64_encode_decode;
pub mod config;
pub mod str_util;
pub mod transaction;
