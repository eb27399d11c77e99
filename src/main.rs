//! ShopOrbit - headless demo storefront

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shoporbit::api::{self, AppState};
use shoporbit::assistant::{AssistantSession, GeminiClient};
use shoporbit::config::AppConfig;
use shoporbit::payment::PaymentSimulator;
use shoporbit::persistence::{IdentityStore, KeyValueStore};
use shoporbit::{Catalog, Storefront};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();
    let config = AppConfig::from_env()?;

    let identity = IdentityStore::new(KeyValueStore::open(&config.state_path)?);
    let store = Storefront::open(Catalog::seeded(), identity);
    let generator = Arc::new(GeminiClient::new(config.gemini.clone())?);
    let state = AppState::new(store, AssistantSession::new(config.history_turns), generator, PaymentSimulator::new(config.payment_delay));

    let app = api::router(state);
    let addr = config.bind_addr();
    tracing::info!("🛒 ShopOrbit storefront listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
