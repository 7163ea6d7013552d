pub mod image_cache;
pub mod l1_service;
pub mod launch_api;
pub mod token_service;
