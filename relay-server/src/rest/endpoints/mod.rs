pub mod health_check;
pub mod images;
pub mod responses;
pub mod static_page;
pub mod token_tx;
