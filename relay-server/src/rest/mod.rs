pub mod endpoints;
pub mod marshalling;
pub mod web_app;
