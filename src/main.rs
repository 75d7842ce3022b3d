use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cache;
mod config;
mod dashboard;
mod news;
mod pages;
mod routes;
mod utils;
mod weather;

use config::Config;
use dashboard::Dashboard;
use routes::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_news_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    if config.openweather_api_key.is_none() {
        tracing::warn!("WEATHER_API_KEY is not set; weather will be unavailable");
    }
    if config.reddit_client_id.is_none() || config.reddit_client_secret.is_none() {
        tracing::warn!("Reddit credentials are not set; headlines will be unavailable");
    }

    // One HTTP client, shared by both providers
    let http = utils::build_http_client(config.http_timeout_secs)?;
    let dashboard = Arc::new(Dashboard::new(&config, http));

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        config: Arc::new(config),
        dashboard,
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Dashboard listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
