use crate::cache::ResultCache;
use crate::config::Config;
use crate::news::{NewsItem, NewsKey, RedditClient};
use crate::weather::{OpenWeatherClient, WeatherSummary};
use reqwest::Client;
use std::convert::Infallible;
use std::time::Duration;

/// Cached access to both providers.
///
/// Failures are logged here and stored as `None`, so an outage costs one
/// upstream call per TTL window rather than one per request.
pub struct Dashboard {
    weather_client: OpenWeatherClient,
    reddit_client: RedditClient,
    weather_cache: ResultCache<String, Option<WeatherSummary>>,
    news_cache: ResultCache<NewsKey, Option<Vec<NewsItem>>>,
    city: String,
    weather_ttl: Duration,
    news_ttl: Duration,
}

impl Dashboard {
    pub fn new(config: &Config, http: Client) -> Self {
        Self {
            weather_client: OpenWeatherClient::new(http.clone(), config),
            reddit_client: RedditClient::new(http, config),
            weather_cache: ResultCache::new(),
            news_cache: ResultCache::new(),
            city: config.weather_city.clone(),
            weather_ttl: Duration::from_secs(config.weather_cache_ttl_secs),
            news_ttl: Duration::from_secs(config.news_cache_ttl_secs),
        }
    }

    pub async fn cached_weather(&self) -> Option<WeatherSummary> {
        let result = self
            .weather_cache
            .get_or_compute(self.city.clone(), self.weather_ttl, move || async move {
                tracing::debug!("Weather cache miss for {}", self.city);
                match self.weather_client.fetch_weather(&self.city).await {
                    Ok(weather) => Ok::<_, Infallible>(Some(weather)),
                    Err(e) if e.is_configuration() => {
                        tracing::error!("Weather API is not configured: {}", e);
                        Ok(None)
                    }
                    Err(e) => {
                        tracing::warn!("Weather API error: {}", e);
                        Ok(None)
                    }
                }
            })
            .await;

        result.unwrap_or_else(|never| match *never {})
    }

    pub async fn cached_news(&self, feed: &str, limit: u32) -> Option<Vec<NewsItem>> {
        let key = NewsKey::new(feed, limit);
        let result = self
            .news_cache
            .get_or_compute(key, self.news_ttl, move || async move {
                tracing::debug!("News cache miss for r/{} (limit {})", feed, limit);
                match self.reddit_client.fetch_headlines(feed, limit).await {
                    Ok(items) => Ok::<_, Infallible>(Some(items)),
                    Err(e) if e.is_configuration() => {
                        tracing::error!("Reddit API is not configured: {}", e);
                        Ok(None)
                    }
                    Err(e) => {
                        tracing::warn!("Reddit API error: {}", e);
                        Ok(None)
                    }
                }
            })
            .await;

        result.unwrap_or_else(|never| match *never {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_weather_cached_within_ttl() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "London",
                "main": {"temp": 18.3},
                "weather": [{"description": "clear sky"}]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dashboard = Dashboard::new(&Config::for_tests(&mock_server.uri()), Client::new());

        let first = dashboard.cached_weather().await;
        let second = dashboard.cached_weather().await;

        assert_eq!(first, second);
        assert_eq!(first.unwrap().description, "Clear sky");
    }

    #[tokio::test]
    async fn test_upstream_failure_cached_as_absence() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dashboard = Dashboard::new(&Config::for_tests(&mock_server.uri()), Client::new());

        assert_eq!(dashboard.cached_weather().await, None);
        assert_eq!(dashboard.cached_weather().await, None);
    }

    #[tokio::test]
    async fn test_news_keyed_by_feed_and_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "token-123",
                "expires_in": 86400
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/r/cyberpunkgame/hot"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"children": [
                    {"kind": "t3", "data": {"title": "one", "url": "https://example.com/1"}},
                    {"kind": "t3", "data": {"title": "two", "url": "https://example.com/2"}}
                ]}
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let dashboard = Dashboard::new(&Config::for_tests(&mock_server.uri()), Client::new());

        let five = dashboard.cached_news("cyberpunkgame", 5).await.unwrap();
        let again = dashboard.cached_news("cyberpunkgame", 5).await.unwrap();
        let one = dashboard.cached_news("cyberpunkgame", 1).await.unwrap();

        assert_eq!(five, again);
        assert_eq!(five.len(), 2);
        assert_eq!(one.len(), 1);
    }
}
