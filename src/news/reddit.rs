use super::image::resolve_image;
use super::types::*;
use crate::config::Config;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

/// Reddit lets a subreddit pin at most this many posts.
const MAX_STICKIED: u32 = 2;
const LISTING_MAX: u32 = 100;
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);
const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 3600);

#[derive(Error, Debug)]
pub enum RedditError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
    #[error("Authentication failed: {0}")]
    AuthFailed(String),
    #[error("Subreddit not found: {0}")]
    FeedNotFound(String),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("REDDIT_CLIENT_ID and REDDIT_CLIENT_SECRET must be configured")]
    MissingCredentials,
}

impl RedditError {
    /// True for local misconfiguration, false for upstream failures.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredentials)
    }
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: Instant,
}

impl AccessToken {
    fn is_fresh(&self) -> bool {
        Instant::now() + TOKEN_REFRESH_MARGIN < self.expires_at
    }
}

/// Application-only OAuth client for subreddit listings.
pub struct RedditClient {
    client: Client,
    client_id: Option<String>,
    client_secret: Option<String>,
    user_agent: String,
    auth_url: String,
    api_base_url: String,
    skip_stickied: bool,
    token: RwLock<Option<AccessToken>>,
}

impl RedditClient {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            client_id: config.reddit_client_id.clone(),
            client_secret: config.reddit_client_secret.clone(),
            user_agent: config.reddit_user_agent.clone(),
            auth_url: config.reddit_auth_url.trim_end_matches('/').to_string(),
            api_base_url: config.reddit_api_base_url.trim_end_matches('/').to_string(),
            skip_stickied: config.news_skip_stickied,
            token: RwLock::new(None),
        }
    }

    /// Hot posts of `feed`, at most `limit` of them, in ranking order.
    #[instrument(skip(self), level = "debug")]
    pub async fn fetch_headlines(
        &self,
        feed: &str,
        limit: u32,
    ) -> Result<Vec<NewsItem>, RedditError> {
        let limit = limit.clamp(1, LISTING_MAX);
        let requested = if self.skip_stickied {
            (limit + MAX_STICKIED).min(LISTING_MAX)
        } else {
            limit
        };

        let token = self.access_token().await?;
        let listing = self.fetch_listing(feed, &token, requested, None).await?;
        let after = listing.data.after.clone();
        let mut items = headlines_from_listing(listing, limit as usize, self.skip_stickied);

        // A page tops out at LISTING_MAX, so pinned posts can leave a full
        // request short. Top it up from the next page.
        let short = limit as usize - items.len();
        if self.skip_stickied && requested < limit + MAX_STICKIED && short > 0 {
            if let Some(after) = after {
                let next = self
                    .fetch_listing(feed, &token, short as u32, Some(&after))
                    .await?;
                items.extend(headlines_from_listing(next, short, self.skip_stickied));
            }
        }

        Ok(items)
    }

    async fn fetch_listing(
        &self,
        feed: &str,
        token: &str,
        limit: u32,
        after: Option<&str>,
    ) -> Result<Listing, RedditError> {
        let url = format!(
            "{}/r/{}/hot",
            self.api_base_url,
            urlencoding::encode(feed)
        );

        let mut query = vec![("limit", limit.to_string()), ("raw_json", "1".to_string())];
        if let Some(after) = after {
            query.push(("after", after.to_string()));
        }

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .bearer_auth(token)
            .query(&query)
            .send()
            .await?;

        // Unknown subreddits are answered with a redirect to the search page.
        if response.url().path().starts_with("/subreddits/search") {
            return Err(RedditError::FeedNotFound(feed.to_string()));
        }

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            StatusCode::UNAUTHORIZED => {
                *self.token.write().await = None;
                Err(RedditError::AuthFailed("access token rejected".to_string()))
            }
            StatusCode::FORBIDDEN => Err(RedditError::AuthFailed(format!(
                "access to r/{} is forbidden",
                feed
            ))),
            StatusCode::NOT_FOUND => Err(RedditError::FeedNotFound(feed.to_string())),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(RedditError::ApiError(format!(
                    "HTTP {}: {}",
                    status, error_text
                )))
            }
        }
    }

    async fn access_token(&self) -> Result<String, RedditError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if token.is_fresh() {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *self.token.write().await = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Result<AccessToken, RedditError> {
        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            return Err(RedditError::MissingCredentials);
        };

        tracing::debug!("Requesting Reddit application token");

        let response = self
            .client
            .post(format!("{}/api/v1/access_token", self.auth_url))
            .header(USER_AGENT, &self.user_agent)
            .basic_auth(client_id, Some(client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body = response.bytes().await?;
                let token: TokenResponse = serde_json::from_slice(&body)?;
                match (token.access_token, token.error) {
                    (Some(value), None) => {
                        let lifetime = token
                            .expires_in
                            .map_or(DEFAULT_TOKEN_LIFETIME, Duration::from_secs)
                            .min(MAX_TOKEN_LIFETIME);
                        Ok(AccessToken {
                            value,
                            expires_at: Instant::now() + lifetime,
                        })
                    }
                    (_, Some(error)) => Err(RedditError::AuthFailed(error)),
                    (None, None) => Err(RedditError::AuthFailed(
                        "token response has no access_token".to_string(),
                    )),
                }
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RedditError::AuthFailed(
                format!("token endpoint answered {}", response.status()),
            )),
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(RedditError::ApiError(format!(
                    "HTTP {}: {}",
                    status, error_text
                )))
            }
        }
    }
}

/// Normalize a listing, dropping pinned posts first when asked to.
pub fn headlines_from_listing(listing: Listing, limit: usize, skip_stickied: bool) -> Vec<NewsItem> {
    listing
        .data
        .children
        .into_iter()
        .filter(|child| child.kind == "t3")
        .map(|child| child.data)
        .filter(|post| !(skip_stickied && post.stickied))
        .take(limit)
        .map(|post| NewsItem::from(&post))
        .collect()
}

impl From<&RawPost> for NewsItem {
    fn from(post: &RawPost) -> Self {
        Self {
            title: post.title.clone(),
            url: post.url.clone(),
            image: resolve_image(post),
        }
    }
}
