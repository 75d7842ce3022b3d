use super::types::*;
use crate::config::Config;
use crate::utils::capitalize;
use reqwest::Client;
use thiserror::Error;
use tracing::instrument;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Response is missing field `{0}`")]
    MissingField(&'static str),
    #[error("WEATHER_API_KEY is not configured")]
    MissingApiKey,
}

impl WeatherError {
    /// True for local misconfiguration, false for upstream failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }
}

pub struct OpenWeatherClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            api_key: config.openweather_api_key.clone(),
            base_url: config.openweather_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current conditions for `city`, in metric units.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_weather(&self, city: &str) -> Result<WeatherSummary, WeatherError> {
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;
        let url = format!("{}{}", self.base_url, CURRENT_WEATHER_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()
            .await?;

        match response.status() {
            reqwest::StatusCode::OK => {
                let body = response.bytes().await?;
                let raw: CurrentWeatherResponse = serde_json::from_slice(&body)?;
                WeatherSummary::try_from(raw)
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(WeatherError::ApiError(format!(
                    "HTTP {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

impl TryFrom<CurrentWeatherResponse> for WeatherSummary {
    type Error = WeatherError;

    fn try_from(raw: CurrentWeatherResponse) -> Result<Self, Self::Error> {
        let city = raw.name.ok_or(WeatherError::MissingField("name"))?;
        let temp = raw
            .main
            .and_then(|m| m.temp)
            .ok_or(WeatherError::MissingField("main.temp"))?;
        let description = raw
            .weather
            .into_iter()
            .next()
            .and_then(|w| w.description)
            .ok_or(WeatherError::MissingField("weather[0].description"))?;

        Ok(Self {
            city,
            temp,
            description: capitalize(&description),
        })
    }
}
