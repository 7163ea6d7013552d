pub mod token_service_impl;
