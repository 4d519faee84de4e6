use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use responder_core::{Reply, SendRequest, SendResponse, SmsClient, SmsError};
use responder_web::{router, AppState};
use serde_json::json;
use tower::ServiceExt;

/// Test double for the provider: records every send, optionally fails.
struct FakeProvider {
    fail: bool,
    sent: Mutex<Vec<(String, String, String)>>,
}

impl FakeProvider {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            fail,
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SmsClient for FakeProvider {
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        self.sent.lock().unwrap().push((
            req.from.to_string(),
            req.to.to_string(),
            req.text.to_string(),
        ));
        if self.fail {
            return Err(SmsError::Http("connection refused".into()));
        }
        Ok(SendResponse {
            id: "msg-abc-123".into(),
            provider: "fake",
            raw: json!({ "data": { "id": "msg-abc-123" } }),
        })
    }
}

fn app(provider: Arc<FakeProvider>) -> axum::Router {
    router(AppState { client: provider })
}

fn inbound_request(text: &str) -> Request<Body> {
    let body = json!({
        "data": {
            "payload": {
                "text": text,
                "from": { "phone_number": "+15550001111" },
                "to": [ { "phone_number": "+15550002222" } ]
            }
        }
    });
    Request::builder()
        .method("POST")
        .uri("/inbound")
        .header("content-type", "application/json")
        .header("host", "localhost:5000")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn inbound_acknowledges_with_empty_body() {
    let provider = FakeProvider::new(false);
    let res = app(provider)
        .oneshot(inbound_request("pizza"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test]
async fn upper_case_pizza_gets_pizza_reply() {
    let provider = FakeProvider::new(false);
    app(provider.clone())
        .oneshot(inbound_request("PIZZA"))
        .await
        .unwrap();

    let sent = provider.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].2, Reply::Pizza.text());
}

#[tokio::test]
async fn pizza_please_is_not_a_keyword() {
    let provider = FakeProvider::new(false);
    app(provider.clone())
        .oneshot(inbound_request("Pizza please"))
        .await
        .unwrap();

    let sent = provider.sent.lock().unwrap();
    assert_eq!(sent[0].2, Reply::Fallback.text());
}

#[tokio::test]
async fn inbound_stays_200_when_provider_is_down() {
    let provider = FakeProvider::new(true);
    let res = app(provider.clone())
        .oneshot(inbound_request("ice cream"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    // Exactly one send attempt, no retries.
    assert_eq!(provider.sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn delivery_report_acknowledges_with_empty_body() {
    let provider = FakeProvider::new(false);
    let body = json!({ "data": { "payload": { "id": "msg-abc-123" } } });
    let req = Request::builder()
        .method("POST")
        .uri("/outbound")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let res = app(provider.clone()).oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
    // The sink only logs; nothing is sent.
    assert!(provider.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_inbound_events_each_get_one_send() {
    use futures::future;

    let provider = FakeProvider::new(false);
    let app = app(provider.clone());

    let futures = (0..10).map(|i| {
        let app = app.clone();
        let text = if i % 2 == 0 { "pizza" } else { "ice cream" };
        async move { app.oneshot(inbound_request(text)).await.unwrap() }
    });

    let responses = future::join_all(futures).await;

    for res in responses {
        assert_eq!(res.status(), StatusCode::OK);
    }
    assert_eq!(provider.sent.lock().unwrap().len(), 10);
}
