use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub weather_city: String,
    pub reddit_client_id: Option<String>,
    pub reddit_client_secret: Option<String>,
    pub reddit_user_agent: String,
    pub reddit_auth_url: String,
    pub reddit_api_base_url: String,
    pub news_skip_stickied: bool,
    pub weather_cache_ttl_secs: u64,
    pub news_cache_ttl_secs: u64,
    pub http_timeout_secs: u64,
    pub bind_addr: String,
    pub static_dir: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            openweather_api_key: optional_var("WEATHER_API_KEY"),
            openweather_base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| "https://api.openweathermap.org".to_string()),
            weather_city: env::var("WEATHER_CITY")
                .unwrap_or_else(|_| "Považská Bystrica, SK".to_string()),
            reddit_client_id: optional_var("REDDIT_CLIENT_ID"),
            reddit_client_secret: optional_var("REDDIT_CLIENT_SECRET"),
            reddit_user_agent: env::var("REDDIT_USER_AGENT")
                .unwrap_or_else(|_| "WeatherNewsDashboard:v1.0".to_string()),
            reddit_auth_url: env::var("REDDIT_AUTH_URL")
                .unwrap_or_else(|_| "https://www.reddit.com".to_string()),
            reddit_api_base_url: env::var("REDDIT_API_BASE_URL")
                .unwrap_or_else(|_| "https://oauth.reddit.com".to_string()),
            news_skip_stickied: parsed_var("NEWS_SKIP_STICKIED", true)?,
            weather_cache_ttl_secs: parsed_var("WEATHER_CACHE_TTL_SECS", 600)?,
            news_cache_ttl_secs: parsed_var("NEWS_CACHE_TTL_SECS", 300)?,
            http_timeout_secs: parsed_var("HTTP_TIMEOUT_SECS", 10)?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:5000".to_string()),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
        })
    }
}

/// Credentials are optional at startup; blank values count as unset.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value {:?}: {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing both providers at a local mock server.
    pub fn for_tests(base_url: &str) -> Self {
        Config {
            openweather_api_key: Some("test-key".to_string()),
            openweather_base_url: base_url.to_string(),
            weather_city: "London".to_string(),
            reddit_client_id: Some("client-id".to_string()),
            reddit_client_secret: Some("client-secret".to_string()),
            reddit_user_agent: "WeatherNewsDashboard:test".to_string(),
            reddit_auth_url: base_url.to_string(),
            reddit_api_base_url: base_url.to_string(),
            news_skip_stickied: true,
            weather_cache_ttl_secs: 600,
            news_cache_ttl_secs: 300,
            http_timeout_secs: 5,
            bind_addr: "127.0.0.1:0".to_string(),
            static_dir: "static".to_string(),
        }
    }
}
