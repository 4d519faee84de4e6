//! # SMS Responder
//!
//! A keyword auto-responder for inbound SMS, backed by Telnyx webhooks.
//!
//! Two endpoints, no shared state between requests:
//!
//! - `POST /inbound` — receives an SMS event, normalizes the text, matches
//!   it against the keywords `pizza` and `ice cream`, and sends back one of
//!   two canned replies (or a fallback prompt) through the Telnyx send API,
//!   with a per-message delivery-report callback URL.
//! - `POST /outbound` — receives the asynchronous delivery report and logs
//!   the message id.
//!
//! Both endpoints always acknowledge with an empty `200`, even when the
//! outbound send fails, so the provider never retries the inbound event.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sms_responder::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! println!("listening on {}:{}", config.server.host, config.server.port);
//! ```
//!
//! Configuration is layered: built-in defaults, then `config/default`,
//! `config/{RUN_MODE}`, `config/local`, then `SMS_RESPONDER__*` environment
//! variables. The only required setting is the Telnyx API key, e.g.
//! `SMS_RESPONDER__TELNYX__API_KEY`.

pub mod config;

pub use config::*;

/// Common imports for responder usage
pub mod prelude {
    pub use crate::config::{AppConfig, LoggingConfig, ServerConfig, TelnyxConfig};
    pub use responder_core::*;
    pub use responder_telnyx::TelnyxClient;
    pub use responder_web::{router, AppState};
}
