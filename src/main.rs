use std::sync::Arc;

use responder_telnyx::TelnyxClient;
use responder_web::{router, AppState};
use sms_responder::config::AppConfig;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(fmt::layer().json().with_target(true)).init();
    } else {
        registry.with(fmt::layer()).init();
    }

    // The provider client is built once from configuration and injected;
    // handlers never touch credentials.
    let client = TelnyxClient::with_base_url(config.telnyx.api_key, config.telnyx.base_url);
    let state = AppState {
        client: Arc::new(client),
    };

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "sms-responder listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
