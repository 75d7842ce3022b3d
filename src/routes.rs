use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::services::ServeDir;

use crate::{
    config::Config,
    dashboard::Dashboard,
    news::NewsItem,
    pages,
    utils::last_updated,
    weather::WeatherSummary,
};

pub const DEFAULT_FEED: &str = "cyberpunkgame";
pub const DEFAULT_LIMIT: u32 = 5;
pub const NEWS_PAGE_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: Arc<Dashboard>,
}

// Response types
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub success: bool,
    pub data: WeatherData,
}

#[derive(Debug, Serialize)]
pub struct WeatherData {
    #[serde(flatten)]
    pub weather: WeatherSummary,
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub success: bool,
    pub data: Vec<NewsItem>,
    pub count: usize,
    pub last_updated: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshAllResponse {
    pub success: bool,
    pub weather: RefreshWeather,
    pub news: Vec<NewsItem>,
    pub last_updated: String,
}

/// Weather fields that go `null` together when the provider is down.
#[derive(Debug, Default, Serialize)]
pub struct RefreshWeather {
    pub city: Option<String>,
    pub temp: Option<f64>,
    pub description: Option<String>,
}

impl From<Option<WeatherSummary>> for RefreshWeather {
    fn from(weather: Option<WeatherSummary>) -> Self {
        match weather {
            Some(w) => Self {
                city: Some(w.city),
                temp: Some(w.temp),
                description: Some(w.description),
            },
            None => Self::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: String,
    pub cache_enabled: bool,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn unavailable(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            success: false,
            error: message.to_string(),
        }),
    )
}

// Page handlers
pub async fn home(State(state): State<AppState>) -> Html<String> {
    let (weather, news) = tokio::join!(
        state.dashboard.cached_weather(),
        state.dashboard.cached_news(DEFAULT_FEED, DEFAULT_LIMIT)
    );
    Html(pages::render_home(weather.as_ref(), news.as_deref()))
}

pub async fn news_page(State(state): State<AppState>) -> Html<String> {
    let news = state
        .dashboard
        .cached_news(DEFAULT_FEED, NEWS_PAGE_LIMIT)
        .await;
    let endpoint = format!("/api/news/{}/{}", DEFAULT_FEED, NEWS_PAGE_LIMIT);
    Html(pages::render_news(news.as_deref(), &endpoint))
}

// API handlers
pub async fn api_weather(State(state): State<AppState>) -> ApiResult<WeatherResponse> {
    match state.dashboard.cached_weather().await {
        Some(weather) => Ok(Json(WeatherResponse {
            success: true,
            data: WeatherData {
                weather,
                last_updated: last_updated(),
            },
        })),
        None => Err(unavailable("Unable to fetch weather data")),
    }
}

pub async fn api_news(State(state): State<AppState>) -> ApiResult<NewsResponse> {
    news_response(&state, DEFAULT_FEED, DEFAULT_LIMIT).await
}

pub async fn api_news_feed(
    State(state): State<AppState>,
    Path(feed): Path<String>,
) -> ApiResult<NewsResponse> {
    news_response(&state, &feed, DEFAULT_LIMIT).await
}

pub async fn api_news_feed_limit(
    State(state): State<AppState>,
    Path((feed, limit)): Path<(String, u32)>,
) -> ApiResult<NewsResponse> {
    news_response(&state, &feed, limit.clamp(1, MAX_LIMIT)).await
}

async fn news_response(state: &AppState, feed: &str, limit: u32) -> ApiResult<NewsResponse> {
    match state.dashboard.cached_news(feed, limit).await {
        Some(news) if !news.is_empty() => Ok(Json(NewsResponse {
            success: true,
            count: news.len(),
            data: news,
            last_updated: last_updated(),
        })),
        _ => Err(unavailable("Unable to fetch news data")),
    }
}

pub async fn api_refresh_all(State(state): State<AppState>) -> Json<RefreshAllResponse> {
    let (weather, news) = tokio::join!(
        state.dashboard.cached_weather(),
        state.dashboard.cached_news(DEFAULT_FEED, DEFAULT_LIMIT)
    );

    Json(RefreshAllResponse {
        success: true,
        weather: weather.into(),
        news: news.unwrap_or_default(),
        last_updated: last_updated(),
    })
}

pub async fn api_status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online".to_string(),
        timestamp: chrono::Local::now().to_rfc3339(),
        cache_enabled: true,
    })
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(home))
        .route("/news", get(news_page))
        .route("/api/weather", get(api_weather))
        .route("/api/news", get(api_news))
        .route("/api/news/:feed", get(api_news_feed))
        .route("/api/news/:feed/:limit", get(api_news_feed_limit))
        .route("/api/refresh-all", get(api_refresh_all))
        .route("/api/status", get(api_status))
        .nest_service("/static", static_files)
        .with_state(state)
}
