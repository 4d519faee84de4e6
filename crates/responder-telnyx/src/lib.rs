use async_trait::async_trait;
use responder_core::{SendRequest, SendResponse, SmsClient, SmsError};
use serde::{Deserialize, Serialize};

const PROVIDER: &str = "telnyx";

/// Telnyx v2 REST client.
#[derive(Clone, Debug)]
pub struct TelnyxClient {
    /// Telnyx API key (v2 Bearer token).
    pub api_key: String,
    /// API base URL; override for testing/mocking.
    pub base_url: String,
    #[cfg(feature = "reqwest")]
    http: reqwest::Client,
}

impl TelnyxClient {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self::with_base_url(api_key, "https://api.telnyx.com".to_string())
    }

    pub fn with_base_url<S: Into<String>>(api_key: S, base_url: String) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            #[cfg(feature = "reqwest")]
            http: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TelnyxSendRequest<'a> {
    from: &'a str,
    to: &'a str,
    text: &'a str,
    webhook_url: &'a str,
    use_profile_webhooks: bool,
}

#[async_trait]
impl SmsClient for TelnyxClient {
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        #[cfg(not(feature = "reqwest"))]
        {
            let _ = req;
            return Err(SmsError::Unexpected("reqwest feature disabled".into()));
        }
        #[cfg(feature = "reqwest")]
        {
            let url = format!("{}/v2/messages", self.base_url.trim_end_matches('/'));
            let payload = TelnyxSendRequest {
                from: req.from,
                to: req.to,
                text: req.text,
                webhook_url: req.webhook_url,
                use_profile_webhooks: req.use_profile_webhooks,
            };
            let res = self
                .http
                .post(url)
                .bearer_auth(&self.api_key)
                .json(&payload)
                .send()
                .await
                .map_err(|e| SmsError::Http(e.to_string()))?;

            if !res.status().is_success() {
                let status = res.status();
                let body = res.text().await.unwrap_or_default();
                return Err(SmsError::Provider(format!("HTTP {}: {}", status, body)));
            }

            let raw_text = res
                .text()
                .await
                .map_err(|e| SmsError::Http(e.to_string()))?;
            let raw_json: serde_json::Value = serde_json::from_str(&raw_text)
                .unwrap_or_else(|_| serde_json::json!({ "raw": raw_text }));

            // Message id lives at data.id in the v2 response envelope.
            let id = raw_json
                .get("data")
                .and_then(|d| d.get("id"))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
                .unwrap_or_else(responder_core::fallback_id);

            Ok(SendResponse {
                id,
                provider: PROVIDER,
                raw: raw_json,
            })
        }
    }
}

/// One participant in a Telnyx message payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhoneParty {
    pub phone_number: String,
}

/// Inbound SMS webhook: `{data: {payload: {text, from, to}}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InboundEvent {
    pub data: InboundData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InboundData {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<String>,
    pub payload: InboundPayload,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InboundPayload {
    pub text: String,
    pub from: PhoneParty,
    pub to: Vec<PhoneParty>,
}

impl InboundData {
    /// Best-effort parse of the event timestamp (Telnyx emits RFC 3339).
    pub fn occurred_at(&self) -> Option<time::OffsetDateTime> {
        self.occurred_at.as_deref().and_then(|s| {
            time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339).ok()
        })
    }
}

/// Delivery-report (DLR) webhook: `{data: {payload: {id}}}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryEvent {
    pub data: DeliveryData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryData {
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<String>,
    pub payload: DeliveryPayload,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliveryPayload {
    pub id: String,
}

impl DeliveryData {
    /// Best-effort parse of the event timestamp (Telnyx emits RFC 3339).
    pub fn occurred_at(&self) -> Option<time::OffsetDateTime> {
        self.occurred_at.as_deref().and_then(|s| {
            time::OffsetDateTime::parse(s, &time::format_description::well_known::Rfc3339).ok()
        })
    }
}
