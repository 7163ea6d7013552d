//! Client side of the token launch flow.
//!
//! [`orchestrator::TokenLaunchClient`] drives a single launch from wallet connection
//! to broadcast, reporting every step as a [`notification::Notification`].
pub mod error;
pub mod notification;
pub mod orchestrator;
pub mod relay;
pub mod wallet;
