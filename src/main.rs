//! Claims Insight Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring the inference client, routes, and
//! middleware.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use claims_insight_engine::config::ai::AiConfig;
use claims_insight_engine::{build_client_from_config, create_router, AppState};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments. This is how
    // HUGGINGFACE_API_KEY reaches the config resolution.
    let _ = dotenvy::dotenv();

    init_tracing();

    let cfg = AiConfig::load_or_disabled("config/ai.json");
    let client = build_client_from_config(&cfg);
    info!(
        provider = client.provider_name(),
        configured = client.is_configured(),
        "inference client ready"
    );

    let state = AppState::new(client);
    let router = create_router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}
