pub mod dto;
pub mod image;
pub mod token;
