//! Axum handlers for the two webhook endpoints.
//!
//! `POST /inbound` receives an SMS, picks a canned reply, and sends it back
//! through the injected [`SmsClient`]. `POST /outbound` receives the
//! provider's delivery report for that reply and logs it. Both endpoints
//! always acknowledge with an empty `200`; returning an error to the
//! provider would trigger a redelivery of the same inbound event.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use responder_core::{normalize, Reply, SendRequest, SmsClient};
use responder_telnyx::{DeliveryEvent, InboundEvent};
use tracing::{error, info};

/// Fixed path the provider calls back with delivery reports.
pub const DELIVERY_REPORT_PATH: &str = "/outbound";

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn SmsClient>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/inbound", post(inbound_message))
        .route(DELIVERY_REPORT_PATH, post(delivery_report))
        .with_state(state)
}

/// Rebuild the externally-visible base URL of this request and append the
/// delivery-report path. Scheme comes from `x-forwarded-proto` when a proxy
/// supplies it, else plain http.
fn delivery_report_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("{}://{}{}", scheme, host, DELIVERY_REPORT_PATH)
}

/// Inbound dispatcher: one reply decision and at most one send per event.
async fn inbound_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(event): Json<InboundEvent>,
) -> StatusCode {
    let webhook_url = delivery_report_url(&headers);
    let payload = event.data.payload;

    let reply = Reply::decide(&normalize(&payload.text));

    let Some(our_number) = payload.to.first() else {
        error!("inbound event carries no recipient number, dropping");
        return StatusCode::OK;
    };

    // Reply to the sender: our provider number becomes `from`, the
    // original sender becomes `to`.
    let result = state
        .client
        .send(SendRequest {
            from: &our_number.phone_number,
            to: &payload.from.phone_number,
            text: reply.text(),
            webhook_url: &webhook_url,
            use_profile_webhooks: false,
        })
        .await;

    match result {
        Ok(res) => info!(id = %res.id, provider = res.provider, "sent reply"),
        Err(e) => error!(error = %e, "outbound send failed"),
    }

    StatusCode::OK
}

/// Delivery log sink: record the confirmed message id, nothing else.
async fn delivery_report(Json(event): Json<DeliveryEvent>) -> StatusCode {
    info!(id = %event.data.payload.id, "received delivery report");
    StatusCode::OK
}
