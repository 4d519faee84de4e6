//! # Responder Core
//!
//! Core traits and types for the SMS auto-responder.
//!
//! This crate provides the building blocks shared by the provider backend
//! and the web layer:
//! - [`SmsClient`] trait for sending SMS messages
//! - [`SendRequest`] / [`SendResponse`] wire types
//! - [`normalize`] and [`Reply`], the inbound-message decision logic
//!
//! ## Example
//!
//! ```rust,ignore
//! use responder_core::{normalize, Reply};
//!
//! let reply = Reply::decide(&normalize("  PIZZA  "));
//! assert_eq!(reply, Reply::Pizza);
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during SMS operations
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// HTTP communication error
    #[error("http error: {0}")]
    Http(String),
    /// Authentication/authorization error
    #[error("authentication error: {0}")]
    Auth(String),
    /// Invalid request parameters
    #[error("invalid request: {0}")]
    Invalid(String),
    /// SMS provider returned an error
    #[error("provider error: {0}")]
    Provider(String),
    /// Unexpected error occurred
    #[error("unexpected: {0}")]
    Unexpected(String),
}

/// Outbound send request handed to a provider backend.
///
/// `webhook_url` is the delivery-report callback for this one message;
/// `use_profile_webhooks: false` tells the provider to use it instead of
/// any profile-level webhook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub text: &'a str,
    pub webhook_url: &'a str,
    pub use_profile_webhooks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub id: String,
    /// Name of the backend/provider that produced the response, e.g. "telnyx".
    pub provider: &'static str,
    /// Raw provider payload for debugging / audit.
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait SmsClient: Send + Sync {
    /// Send a single text SMS.
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError>;
}

/// Utility to create a pseudo id if a provider doesn't return one.
pub fn fallback_id() -> String {
    Uuid::new_v4().to_string()
}

/// Lower-case the text and collapse every run of whitespace to one space.
///
/// Idempotent: normalizing already-normalized text is a no-op.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// The canned reply selected for one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Pizza,
    IceCream,
    Fallback,
}

impl Reply {
    /// Keyword lookup over normalized text. Exact equality only; a message
    /// like "pizza please" falls through to [`Reply::Fallback`].
    pub fn decide(normalized: &str) -> Self {
        match normalized {
            "pizza" => Reply::Pizza,
            "ice cream" => Reply::IceCream,
            _ => Reply::Fallback,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Reply::Pizza => "Chicago pizza is the best",
            Reply::IceCream => "I prefer gelato",
            Reply::Fallback => {
                "Please send either the word 'pizza' or 'ice cream' for a different response"
            }
        }
    }
}
